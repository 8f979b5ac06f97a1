use std::sync::Arc;

use thiserror::Error;

/// Centralized error types for the application
///
/// Store, source, cache and renderer failures are all converted to this enum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database connection pool errors
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] r2d2::Error),

    /// Schema migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] refinery::Error),

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP status code errors
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Font loading errors
    #[error("Font error: {0}")]
    Font(String),

    /// Prayer-time calculation errors
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// Failure shared by every caller waiting on the same cache entry
    #[error("Prayer time lookup failed: {0}")]
    Lookup(Arc<AppError>),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl From<ab_glyph::InvalidFont> for AppError {
    fn from(err: ab_glyph::InvalidFont) -> Self {
        AppError::Font(err.to_string())
    }
}
