//! Error types for the inventory client.
//!
//! This module defines the centralized error type [`InventoryError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Errors never escape the store boundary as unhandled faults: store operations
//! convert them into transient messages and then hand the error back to the caller
//! so it can decide whether to reset the form.

use super::product::ProductField;
use thiserror::Error;

/// The main error type for inventory client operations.
///
/// # Examples
///
/// ```
/// use stocktake::domain::InventoryError;
///
/// let err = InventoryError::network(Some(400), Some("Product already exists".into()), "bad request");
/// assert_eq!(err.user_message("Operation failed"), "Product already exists");
/// ```
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Transport or remote failure.
    ///
    /// `detail` carries the server-supplied explanation when the response body
    /// had one. `reason` is the diagnostic text used for logging.
    #[error("Network error: {reason}")]
    Network {
        status: Option<u16>,
        detail: Option<String>,
        reason: String,
    },

    /// Malformed or missing form input, detected before any remote call.
    #[error("Validation error: {field}: {message}")]
    Validation {
        field: ProductField,
        message: String,
    },

    /// The user declined a destructive action. Not a failure; nothing is shown.
    #[error("Confirmation declined")]
    ConfirmationDeclined,

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    /// Builds a [`InventoryError::Network`] value.
    pub fn network(status: Option<u16>, detail: Option<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            status,
            detail,
            reason: reason.into(),
        }
    }

    /// Builds a [`InventoryError::Validation`] value.
    pub fn validation(field: ProductField, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Text suitable for a transient message.
    ///
    /// Network errors surface the server detail when present, otherwise the
    /// supplied fallback. Validation errors surface their own description.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Network {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            Self::Validation { .. } => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Whether this error is the user backing out of a confirmation.
    #[must_use]
    pub const fn is_declined(&self) -> bool {
        matches!(self, Self::ConfirmationDeclined)
    }
}

impl From<reqwest::Error> for InventoryError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err.status().map(|s| s.as_u16()), None, err.to_string())
    }
}

/// A specialized `Result` type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
