//! Error types for the ordval-core library.
//!
//! Only structural failures are errors. Rule violations are reported as
//! [`Problem`](crate::Problem) values inside the summary.

use thiserror::Error;

/// Main error type for the ordval library.
#[derive(Error, Debug)]
pub enum OrdvalError {
    /// Document does not have the expected shape.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rule configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Structural errors found while extracting orders from a document.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// The document root is not an object.
    #[error("document root must be an object, found {found}")]
    NotAnObject { found: &'static str },

    /// The document has no top-level "orders" field.
    #[error("document has no \"orders\" collection")]
    MissingOrders,

    /// The "orders" field is not an array.
    #[error("\"orders\" must be an array, found {found}")]
    OrdersNotSequence { found: &'static str },

    /// An entry of "orders" is not an object.
    #[error("order at index {index} must be an object, found {found}")]
    MalformedOrder { index: usize, found: &'static str },

    /// An order object could not be decoded.
    #[error("order at index {index} could not be decoded: {reason}")]
    UndecodableOrder { index: usize, reason: String },
}

/// Result type for the ordval library.
pub type Result<T> = std::result::Result<T, OrdvalError>;
