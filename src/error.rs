//! Error types for label generation

use thiserror::Error;

/// Result type alias for label operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a label
#[derive(Error, Debug)]
pub enum Error {
    /// The metadata service could not be reached or returned a failure status
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// The metadata service answered but does not know the product
    #[error("Product not found for EAN: {0}")]
    NotFound(String),

    /// The price format template is malformed
    #[error("Invalid price format: {0}")]
    Format(String),

    /// The identifier is not a valid EAN-13 code
    #[error("Barcode encoding failed: {0}")]
    Encoding(String),

    /// Image composition or encoding failed
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Filesystem error while writing the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
