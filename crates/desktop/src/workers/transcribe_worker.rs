use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use videoscribe_core::audio::infrastructure::whisper_recognizer::WhisperRecognizer;
use videoscribe_core::pipeline::error::TranscribeError;
use videoscribe_core::pipeline::progress::{ChunkProgress, RemainingTime};
use videoscribe_core::pipeline::transcribe_video_use_case::{
    Job, ProgressFn, TranscribeVideoUseCase,
};
use videoscribe_core::shared::model_resolver;
use videoscribe_core::shared::model_size::ModelSize;
use videoscribe_core::video::infrastructure::ffmpeg_cli_extractor::FfmpegCliExtractor;
use videoscribe_core::video::infrastructure::wav_audio_reader::WavAudioReader;

/// Messages sent from the worker thread to the UI.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    DownloadProgress(u64, u64),
    ChunkProgress {
        completed: usize,
        total: usize,
        remaining: RemainingTime,
    },
    Complete {
        chunks: usize,
        total_elapsed: Duration,
    },
    Error(String),
    Cancelled,
}

/// Parameters for one transcription job.
pub struct TranscribeParams {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub model_size: ModelSize,
    pub ffmpeg_path: Option<PathBuf>,
}

/// Spawn a background transcription worker. Returns the channel receiver
/// and cancellation token. The worker never touches UI state; the UI drains
/// the channel on its own schedule.
pub fn spawn(params: TranscribeParams) -> (Receiver<WorkerMessage>, Arc<AtomicBool>) {
    let (tx, rx) = crossbeam_channel::unbounded::<WorkerMessage>();
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancelled_clone = cancelled.clone();

    thread::spawn(move || {
        if let Err(e) = run_transcribe(&tx, &cancelled_clone, &params) {
            if cancelled_clone.load(Ordering::Relaxed) || e.is_cancelled() {
                let _ = tx.send(WorkerMessage::Cancelled);
            } else {
                let _ = tx.send(WorkerMessage::Error(e.to_string()));
            }
        }
    });

    (rx, cancelled)
}

fn run_transcribe(
    tx: &Sender<WorkerMessage>,
    cancelled: &Arc<AtomicBool>,
    params: &TranscribeParams,
) -> Result<(), TranscribeError> {
    let size = params.model_size;
    log::info!(
        "Starting transcription of {} with model {}",
        params.input_path.display(),
        size.filename()
    );

    let tx_dl = tx.clone();
    let model_path = model_resolver::resolve(
        size.filename(),
        &size.url(),
        Some(Box::new(move |downloaded, total| {
            let _ = tx_dl.send(WorkerMessage::DownloadProgress(downloaded, total));
        })),
    )
    .map_err(|e| TranscribeError::Transcription(e.to_string()))?;

    if cancelled.load(Ordering::Relaxed) {
        return Err(TranscribeError::Cancelled);
    }

    let recognizer = WhisperRecognizer::new(&model_path)
        .map_err(|e| TranscribeError::Transcription(e.to_string()))?;
    let extractor = match params.ffmpeg_path {
        Some(ref program) => FfmpegCliExtractor::with_program(program.clone()),
        None => FfmpegCliExtractor::new(),
    };

    let tx_progress = tx.clone();
    let cancelled_progress = cancelled.clone();
    let progress: ProgressFn = Box::new(move |p: ChunkProgress| {
        let _ = tx_progress.send(WorkerMessage::ChunkProgress {
            completed: p.completed,
            total: p.total,
            remaining: p.remaining,
        });
        !cancelled_progress.load(Ordering::Relaxed)
    });

    let job = Job {
        video_path: params.input_path.clone(),
        model_size: size,
        output_path: params.output_path.clone(),
    };
    let use_case = TranscribeVideoUseCase::new(
        Box::new(extractor),
        Box::new(WavAudioReader),
        Box::new(recognizer),
        Some(progress),
        Some(cancelled.clone()),
    );
    let summary = use_case.execute(&job)?;

    let _ = tx.send(WorkerMessage::Complete {
        chunks: summary.chunks,
        total_elapsed: summary.total_elapsed,
    });
    Ok(())
}
