pub mod audio_track;
pub mod chunker;
pub mod speech_recognizer;
