use std::path::Path;

use crate::audio::domain::audio_track::AudioTrack;

/// Domain interface for decoding an audio file into PCM samples.
pub trait AudioReader: Send {
    fn read_audio(&self, path: &Path) -> Result<AudioTrack, Box<dyn std::error::Error>>;
}
