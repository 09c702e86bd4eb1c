use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwotError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("No API key configured. Set OPENAI_API_KEY.")]
    MissingApiKey,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SwotError>;
