use crate::handshake::HandshakeError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Network request failed before a response was received
    NetworkError(String),
    /// Failed to parse JSON/TOML/HTML content
    ParseError(String),
    /// Invalid URL format
    UrlError(String),
    /// Invalid input format
    InvalidInput(String),
    /// IO operation failed
    IoError(String),
    /// One of the login or listing steps failed
    Handshake(HandshakeError),
    /// The listing page held none of the files the job needs
    NoFilesFound { listing: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NetworkError(msg) => write!(f, "Network error: {msg}"),
            AppError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            AppError::UrlError(msg) => write!(f, "Invalid URL: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::IoError(msg) => write!(f, "IO error: {msg}"),
            AppError::Handshake(err) => write!(f, "Handshake error: {err}"),
            AppError::NoFilesFound { listing } => {
                write!(f, "No matching files found on the {listing} listing")
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Handshake(err) => Some(err),
            _ => None,
        }
    }
}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<HandshakeError> for AppError {
    fn from(err: HandshakeError) -> Self {
        AppError::Handshake(err)
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
