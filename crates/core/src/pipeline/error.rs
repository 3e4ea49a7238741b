use thiserror::Error;

/// Terminal failure of a transcription job.
///
/// Collaborator errors are flattened to their message at the pipeline
/// boundary; the message is surfaced to the user verbatim.
#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("{0}")]
    Configuration(String),
    #[error("audio extraction failed: {0}")]
    Extraction(String),
    #[error("transcription failed: {0}")]
    Transcription(String),
    #[error("could not write transcript: {0}")]
    Io(#[from] std::io::Error),
    #[error("cancelled")]
    Cancelled,
}

impl TranscribeError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TranscribeError::Cancelled)
    }
}
