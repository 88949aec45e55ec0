//! Logical operations and their wire names.

use std::fmt;

/// A logical operation, rendered as the `:{method}` suffix of a resource URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// `generateContent`
    GenerateContent,
    /// `streamGenerateContent`
    StreamGenerateContent,
    /// `countTokens`
    CountTokens,
    /// `embedContent`
    EmbedContent,
    /// `batchEmbedContents`
    BatchEmbedContents,
    /// `predict`
    Predict,
}

impl Task {
    /// Wire name of the operation.
    pub fn wire_name(self) -> &'static str {
        match self {
            Task::GenerateContent => "generateContent",
            Task::StreamGenerateContent => "streamGenerateContent",
            Task::CountTokens => "countTokens",
            Task::EmbedContent => "embedContent",
            Task::BatchEmbedContents => "batchEmbedContents",
            Task::Predict => "predict",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
