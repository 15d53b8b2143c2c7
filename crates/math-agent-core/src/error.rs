use std::path::PathBuf;
use thiserror::Error;

/// Failures from a single solve attempt
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("GEMINI_API_KEY is not set. Export it or add it to the config file.")]
    MissingApiKey,

    #[error("Request to the AI service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI service error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("AI service returned no text")]
    EmptyResponse,
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("There is no answer to export yet")]
    NoAnswer,

    #[error(transparent)]
    Report(#[from] ReportError),
}
