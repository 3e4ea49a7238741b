use super::audio_track::AudioTrack;

/// Domain interface for speech-to-text transcription.
///
/// One synchronous call per audio unit; implementations are not assumed to
/// be safe to share across concurrent invocations.
pub trait SpeechRecognizer: Send {
    fn transcribe(&self, audio: &AudioTrack) -> Result<String, Box<dyn std::error::Error>>;
}
