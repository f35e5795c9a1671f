//! Typed errors for the shipment-document extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during extraction operations.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Attachment decoding failed
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// AI service unavailable or failed
    #[error("AI service error: {0}")]
    AI(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors that can occur while decoding attachment bytes.
///
/// A decode failure is fatal for that attachment only; sibling
/// attachments and the other branch continue unaffected.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// PDF text extraction failed
    #[error("PDF decode failed: {reason}")]
    Pdf { reason: String },

    /// Spreadsheet row extraction failed
    #[error("spreadsheet decode failed: {reason}")]
    Spreadsheet { reason: String },

    /// No decoder exists for this attachment type
    #[error("unsupported attachment type: {mime_type}")]
    UnsupportedType { mime_type: String },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for decode operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
