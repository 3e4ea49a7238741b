pub mod audio_extractor;
pub mod audio_reader;
