//! Scrape error types.

use aptus_browser::BrowserError;
use thiserror::Error;

/// Result type alias for scrape operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that abort a dump or update run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The rendered page does not have the shape the dumper expects.
    #[error("Unexpected page shape in {context}: {detail}")]
    SchemaViolation { context: String, detail: String },

    /// A boolean cell held something other than `Ja` or `Nej`.
    #[error("Unknown boolean value {value:?}, expected Ja or Nej")]
    MalformedValue { value: String },

    /// The login page is missing one of its form elements.
    #[error("Login page has no element with id {0}")]
    LoginElementMissing(String),

    /// Still on the login page after submitting credentials.
    #[error("Login failed: still on the login page after submitting credentials")]
    LoginFailed,

    /// Saving an edit form did not show a confirmation message.
    #[error("Saving key {key_id} was not acknowledged")]
    WriteNotAcknowledged { key_id: String },

    /// No unique details-table row carries the label.
    #[error("Could not find field {label} in details table")]
    FieldNotFound { label: String },

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Shorthand for a [`ScrapeError::SchemaViolation`].
    pub fn schema(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SchemaViolation {
            context: context.into(),
            detail: detail.into(),
        }
    }
}
