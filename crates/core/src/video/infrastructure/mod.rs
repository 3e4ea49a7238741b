pub mod ffmpeg_cli_extractor;
pub mod wav_audio_reader;
