use crate::models::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid data root URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;

/// A failed category load, carrying what the error message template needs.
#[derive(Error, Debug)]
#[error("failed to load {category} from {path}: {message}")]
pub struct LoadFailure {
    pub category: Category,
    pub message: String,
    pub path: String,
}

impl LoadFailure {
    pub fn new(category: Category, path: impl Into<String>, err: &ViewerError) -> Self {
        Self {
            category,
            message: err.to_string(),
            path: path.into(),
        }
    }
}
