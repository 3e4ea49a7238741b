/// Nominal length of one transcription chunk.
pub const CHUNK_LENGTH_MS: u64 = 30_000;

/// Sample rate Whisper models expect.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

pub const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "m4v"];

/// Appended to the input file stem to form the transcript file name.
pub const TRANSCRIPT_SUFFIX: &str = "_transcript";
