use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::video::domain::audio_extractor::AudioExtractor;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("could not run '{program}': {source} (is ffmpeg installed and on the search path?)")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Extracts a video's audio track by running the ffmpeg executable.
///
/// Output is 16-bit little-endian PCM WAV, mono, at the Whisper sample rate,
/// with the video stream dropped. `-y` overwrites any existing target file.
pub struct FfmpegCliExtractor {
    program: PathBuf,
}

impl FfmpegCliExtractor {
    /// Use `ffmpeg` from the system search path.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
        }
    }

    /// Use an explicitly configured ffmpeg binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfmpegCliExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioExtractor for FfmpegCliExtractor {
    fn extract(&self, video: &Path, audio_out: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let output = Command::new(&self.program)
            .arg("-y")
            .arg("-i")
            .arg(video)
            .args(["-vn", "-acodec", "pcm_s16le"])
            .args(["-ar", &WHISPER_SAMPLE_RATE.to_string()])
            .args(["-ac", "1"])
            .arg(audio_out)
            .output()
            .map_err(|e| ExtractionError::Spawn {
                program: self.program.display().to_string(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ExtractionError::Failed {
                status: output.status,
                stderr: stderr_tail(&output.stderr),
            }
            .into());
        }
        Ok(())
    }
}

/// ffmpeg prints its whole banner to stderr; keep only the trailing lines
/// that carry the actual failure reason.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail_start = lines.len().saturating_sub(3);
    lines[tail_start..].join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_binary_returns_spawn_error() {
        let tmp = TempDir::new().unwrap();
        let extractor = FfmpegCliExtractor::with_program("/nonexistent/ffmpeg");
        let result = extractor.extract(
            Path::new("/nonexistent/video.mp4"),
            &tmp.path().join("audio.wav"),
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("/nonexistent/ffmpeg"), "got: {err}");
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = b"banner line\nmore banner\nconfig\n\nerror: no such file\n";
        let tail = stderr_tail(stderr);
        assert!(tail.contains("no such file"));
        assert!(!tail.contains("banner line"));
    }

    #[test]
    fn test_stderr_tail_handles_empty() {
        assert_eq!(stderr_tail(b""), "");
    }
}
