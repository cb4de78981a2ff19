//! Error types for the classification path.

/// Failures talking to the text-generation backend.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response contained no text")]
    EmptyCompletion,
}

/// Failures deriving a categorization from a completion.
#[derive(Debug, thiserror::Error)]
pub enum CategorizeError {
    #[error("Text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("No JSON object found in the response")]
    NoJsonObject,

    #[error("Invalid JSON in the response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
