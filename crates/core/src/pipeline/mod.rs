pub mod error;
pub mod progress;
pub mod transcribe_video_use_case;
