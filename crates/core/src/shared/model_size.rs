use serde::{Deserialize, Serialize};

use crate::shared::constants::MODEL_BASE_URL;

/// Named accuracy/latency tier of the Whisper model family.
///
/// Larger models transcribe more accurately but take longer per chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub const ALL: &[ModelSize] = &[
        ModelSize::Tiny,
        ModelSize::Base,
        ModelSize::Small,
        ModelSize::Medium,
        ModelSize::Large,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// ggml model file name as published on the whisper.cpp model hub.
    pub fn filename(self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::Large => "ggml-large-v3.bin",
        }
    }

    pub fn url(self) -> String {
        format!("{MODEL_BASE_URL}/{}", self.filename())
    }

    /// Short accuracy/latency description shown in the model guide.
    pub fn guide(self) -> &'static str {
        match self {
            ModelSize::Tiny => "Smallest and fastest, basic transcription quality.",
            ModelSize::Base => "More accurate than tiny while still fast.",
            ModelSize::Small => "Higher accuracy than base, a bit more processing time.",
            ModelSize::Medium => "Balanced speed and accuracy, a good default.",
            ModelSize::Large => "Highest accuracy, longest processing time.",
        }
    }
}

impl std::fmt::Display for ModelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large" => Ok(ModelSize::Large),
            other => Err(format!(
                "Model size must be one of: tiny, base, small, medium, large, got '{other}'"
            )),
        }
    }
}
