use std::path::Path;

/// Domain interface for demuxing a video's audio track to a PCM WAV file.
///
/// Implementations must overwrite any pre-existing file at `audio_out` and
/// leave the input untouched.
pub trait AudioExtractor: Send {
    fn extract(&self, video: &Path, audio_out: &Path) -> Result<(), Box<dyn std::error::Error>>;
}
