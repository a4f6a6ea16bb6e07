//! Error types for the listing map.
//!
//! This module defines the centralized error type [`ListingMapError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Slider operations never produce errors: degenerate strips degrade to no-ops
//! instead. Everything here concerns the glue around the slider (listings API,
//! client storage, configuration and the background worker).

use thiserror::Error;

/// The main error type for listing map operations.
///
/// Most variants carry a description; I/O and HTTP failures wrap the underlying
/// error using `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use listing_map::domain::ListingMapError;
///
/// fn read_config() -> Result<(), ListingMapError> {
///     Err(ListingMapError::Config("api_base must not be empty".to_string()))
/// }
///
/// assert!(read_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ListingMapError {
    /// Client storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The listings API could not be reached, timed out, or answered with a
    /// non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body or stored document was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A listing record failed boundary validation.
    ///
    /// Raised per record; the caller drops the record and keeps the rest.
    #[error("Invalid listing {id}: {reason}")]
    InvalidListing {
        /// Identifier of the rejected record.
        id: i64,
        /// Which check failed.
        reason: String,
    },

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for listing map operations.
pub type Result<T> = std::result::Result<T, ListingMapError>;
