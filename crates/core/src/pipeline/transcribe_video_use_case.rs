use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::audio::domain::chunker::chunk_spans;
use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::pipeline::error::TranscribeError;
use crate::pipeline::progress::{ChunkProgress, ProgressEstimator};
use crate::shared::constants::CHUNK_LENGTH_MS;
use crate::shared::model_size::ModelSize;
use crate::video::domain::audio_extractor::AudioExtractor;
use crate::video::domain::audio_reader::AudioReader;

/// One end-to-end run from a selected video to a transcript file.
#[derive(Debug, Clone)]
pub struct Job {
    pub video_path: PathBuf,
    pub model_size: ModelSize,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Copy)]
pub struct JobSummary {
    pub chunks: usize,
    pub total_elapsed: Duration,
}

/// Progress callback; return `false` to request cancellation.
pub type ProgressFn = Box<dyn Fn(ChunkProgress) -> bool + Send>;

/// Chunked transcription pipeline: extract audio, split into fixed-length
/// spans, transcribe each span in order, append one transcript line per span.
///
/// The decoded audio lives in a job-scoped temporary directory that is
/// removed when the job ends, whether it completed, failed, or was
/// cancelled. Chunks are processed strictly sequentially; there is no retry
/// of a failed chunk, and lines flushed before a failure stay on disk.
pub struct TranscribeVideoUseCase {
    extractor: Box<dyn AudioExtractor>,
    reader: Box<dyn AudioReader>,
    recognizer: Box<dyn SpeechRecognizer>,
    progress: Option<ProgressFn>,
    cancelled: Option<Arc<AtomicBool>>,
}

impl TranscribeVideoUseCase {
    pub fn new(
        extractor: Box<dyn AudioExtractor>,
        reader: Box<dyn AudioReader>,
        recognizer: Box<dyn SpeechRecognizer>,
        progress: Option<ProgressFn>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            extractor,
            reader,
            recognizer,
            progress,
            cancelled,
        }
    }

    pub fn execute(&self, job: &Job) -> Result<JobSummary, TranscribeError> {
        if !job.video_path.exists() {
            return Err(TranscribeError::Configuration(format!(
                "Input file not found: {}",
                job.video_path.display()
            )));
        }

        let overall_start = Instant::now();

        // Dropping the temp dir removes the decoded audio on every exit path.
        let temp_dir = tempfile::Builder::new()
            .prefix("videoscribe-")
            .tempdir()
            .map_err(TranscribeError::Io)?;
        let wav_path = temp_dir.path().join("audio.wav");

        self.extractor
            .extract(&job.video_path, &wav_path)
            .map_err(|e| TranscribeError::Extraction(e.to_string()))?;

        let track = self
            .reader
            .read_audio(&wav_path)
            .map_err(|e| TranscribeError::Extraction(e.to_string()))?;

        let spans = chunk_spans(track.duration_ms(), CHUNK_LENGTH_MS);
        let total = spans.len();
        log::info!(
            "Transcribing {} ({} ms of audio, {total} chunks)",
            job.video_path.display(),
            track.duration_ms()
        );

        // The transcript file is only created once extraction has succeeded.
        let file = File::create(&job.output_path)?;
        let mut out = BufWriter::new(file);
        let mut estimator = ProgressEstimator::new();

        for span in &spans {
            if self.is_cancelled() {
                return Err(TranscribeError::Cancelled);
            }

            let chunk = track.slice_ms(span.start_ms, span.end_ms);
            let chunk_start = Instant::now();
            let text = self
                .recognizer
                .transcribe(&chunk)
                .map_err(|e| TranscribeError::Transcription(e.to_string()))?;
            let chunk_elapsed = chunk_start.elapsed();
            drop(chunk);

            writeln!(out, "{text}")?;
            out.flush()?;

            estimator.push(chunk_elapsed);
            let event = ChunkProgress {
                completed: span.index + 1,
                total,
                remaining: estimator.remaining(total),
            };
            log::debug!(
                "Chunk {}/{total} took {:.1}s, {} remaining",
                event.completed,
                chunk_elapsed.as_secs_f64(),
                event.remaining
            );
            if let Some(ref cb) = self.progress {
                if !cb(event) {
                    return Err(TranscribeError::Cancelled);
                }
            }
        }

        Ok(JobSummary {
            chunks: total,
            total_elapsed: overall_start.elapsed(),
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
