//! # Error Types
//!
//! This module defines error types used throughout the qrstudio library.

use thiserror::Error;

/// Main error type for qrstudio operations
#[derive(Debug, Error)]
pub enum StudioError {
    /// Invalid configuration value (bad color, unknown theme, ...)
    #[error("Config error: {0}")]
    Config(String),

    /// QR symbol could not be encoded
    #[error("QR error: {0}")]
    Qr(String),

    /// QR symbol could not be turned into a bitmap
    #[error("Decode error: {0}")]
    Decode(String),

    /// Drawing surface could not be acquired
    #[error("Surface error: {0}")]
    Surface(String),

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Text-suggestion service failure
    #[error("Suggestion error: {0}")]
    Suggestion(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
