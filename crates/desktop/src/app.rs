use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use iced::{Element, Subscription, Task, Theme};

use videoscribe_core::pipeline::progress::RemainingTime;
use videoscribe_core::shared::constants::{TRANSCRIPT_SUFFIX, VIDEO_EXTENSIONS};
use videoscribe_core::shared::model_size::ModelSize;

use crate::screen;
use crate::settings::{Appearance, Settings};
use crate::theme;
use crate::workers::transcribe_worker::{self, TranscribeParams, WorkerMessage};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Where the active (or finished) job is in its lifecycle. Owned and
/// rendered exclusively by the UI thread.
#[derive(Debug, Clone)]
pub enum ProcessingState {
    Idle,
    Preparing,
    Downloading(u64, u64),
    Transcribing {
        completed: usize,
        total: usize,
        remaining: RemainingTime,
    },
    Complete {
        chunks: usize,
        total_elapsed: Duration,
    },
    Error(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectInput,
    InputSelected(Option<PathBuf>),
    ModelChanged(ModelSize),
    AppearanceChanged(Appearance),
    RunTranscribe,
    CancelWork,
    PollWorker,
    ShowInFolder,
    StartOver,
}

struct ActiveWorker {
    rx: Receiver<WorkerMessage>,
    cancelled: Arc<AtomicBool>,
}

pub struct App {
    pub settings: Settings,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub processing: ProcessingState,
    worker: Option<ActiveWorker>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                settings: Settings::load(),
                input_path: None,
                output_path: None,
                processing: ProcessingState::Idle,
                worker: None,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectInput => {
                if self.worker.is_none() {
                    return Task::perform(
                        async {
                            rfd::AsyncFileDialog::new()
                                .set_title("Select a video file")
                                .add_filter("Video Files", VIDEO_EXTENSIONS)
                                .pick_file()
                                .await
                                .map(|h| h.path().to_path_buf())
                        },
                        Message::InputSelected,
                    );
                }
            }
            Message::InputSelected(Some(path)) => {
                self.output_path = Some(transcript_path(&path));
                self.input_path = Some(path);
                self.processing = ProcessingState::Idle;
            }
            Message::InputSelected(None) => {}
            Message::ModelChanged(size) => {
                self.settings.model_size = size;
                self.settings.save();
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::RunTranscribe => {
                self.start_job();
            }
            Message::CancelWork => {
                if let Some(ref worker) = self.worker {
                    worker.cancelled.store(true, Ordering::Relaxed);
                }
            }
            Message::PollWorker => {
                self.drain_worker();
            }
            Message::ShowInFolder => {
                if let Some(dir) = self.output_path.as_ref().and_then(|p| p.parent()) {
                    let _ = open::that(dir);
                }
            }
            Message::StartOver => {
                if self.worker.is_none() {
                    self.input_path = None;
                    self.output_path = None;
                    self.processing = ProcessingState::Idle;
                }
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        screen::view(
            self.input_path.as_deref(),
            self.output_path.as_deref(),
            &self.processing,
            self.settings.model_size,
            self.settings.appearance,
        )
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        // Only poll the worker channel while a job is running
        if self.worker.is_some() {
            iced::time::every(POLL_INTERVAL).map(|_| Message::PollWorker)
        } else {
            Subscription::none()
        }
    }

    /// One job at a time: submission is a no-op while a worker is active.
    fn start_job(&mut self) {
        if self.worker.is_some() {
            return;
        }
        let (Some(input), Some(output)) = (self.input_path.clone(), self.output_path.clone())
        else {
            return;
        };

        self.processing = ProcessingState::Preparing;
        let (rx, cancelled) = transcribe_worker::spawn(TranscribeParams {
            input_path: input,
            output_path: output,
            model_size: self.settings.model_size,
            ffmpeg_path: self.settings.ffmpeg_path.clone(),
        });
        self.worker = Some(ActiveWorker { rx, cancelled });
    }

    /// Drain every pending worker message, keeping only the newest progress
    /// snapshot. Terminal messages release the worker slot so a new job can
    /// be submitted.
    fn drain_worker(&mut self) {
        let Some(ref worker) = self.worker else {
            return;
        };

        let mut terminal = false;
        while let Ok(message) = worker.rx.try_recv() {
            match message {
                WorkerMessage::DownloadProgress(downloaded, total) => {
                    self.processing = ProcessingState::Downloading(downloaded, total);
                }
                WorkerMessage::ChunkProgress {
                    completed,
                    total,
                    remaining,
                } => {
                    self.processing = ProcessingState::Transcribing {
                        completed,
                        total,
                        remaining,
                    };
                }
                WorkerMessage::Complete {
                    chunks,
                    total_elapsed,
                } => {
                    self.processing = ProcessingState::Complete {
                        chunks,
                        total_elapsed,
                    };
                    terminal = true;
                }
                WorkerMessage::Error(text) => {
                    self.processing = ProcessingState::Error(text);
                    terminal = true;
                }
                WorkerMessage::Cancelled => {
                    self.processing = ProcessingState::Idle;
                    terminal = true;
                }
            }
        }
        if terminal {
            self.worker = None;
        }
    }
}

/// `<stem>_transcript.txt` sibling to the input video.
fn transcript_path(input: &std::path::Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}{TRANSCRIPT_SUFFIX}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_path_is_sibling_with_suffix() {
        let out = transcript_path(std::path::Path::new("/videos/talk.mp4"));
        assert_eq!(out, PathBuf::from("/videos/talk_transcript.txt"));
    }

    #[test]
    fn test_transcript_path_without_extension() {
        let out = transcript_path(std::path::Path::new("/videos/talk"));
        assert_eq!(out, PathBuf::from("/videos/talk_transcript.txt"));
    }
}
