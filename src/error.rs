//! Error types for the ESG dashboard service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EsgError {
    #[error("Scoring service error: {0}")]
    Scoring(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scoring response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported file type: {0}. Please use PDF, CSV, or TXT")]
    UnsupportedFile(String),

    #[error("Upload exceeds {limit} bytes (got {actual})")]
    UploadTooLarge { limit: usize, actual: usize },

    #[error("Missing required input: {0}")]
    EmptyInput(&'static str),

    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error("Alert not found: {0}")]
    AlertNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, EsgError>;
