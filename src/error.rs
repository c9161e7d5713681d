//! Error types for the htmx header protocol.
//!
//! Errors fall into three groups:
//!
//! | Group | Variants | Meaning |
//! |-------|----------|---------|
//! | Caller contract | [`HtmxError::InvalidArgument`] | A blank name, selector, URL or view id was supplied |
//! | Header emission | [`HtmxError::Serialization`], [`HtmxError::InvalidHeaderValue`], [`HtmxError::Render`] | The response could not be written |
//! | Wire parsing | [`HtmxError::HeaderParse`] | A header value does not follow the htmx grammar |
//!
//! Missing request headers are never an error: they are modeled as absent fields on
//! [`HtmxRequest`](crate::HtmxRequest).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HtmxError>;

/// Errors produced while building, compiling or parsing htmx headers.
#[derive(Debug, Error)]
pub enum HtmxError {
    /// A required string argument was empty or blank.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A trigger detail or location value could not be encoded as JSON.
    #[error("failed to serialize header value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A compiled value cannot be carried in an HTTP header.
    #[error("invalid value for header {header}: {value:?}")]
    InvalidHeaderValue {
        /// Wire name of the header being written.
        header: String,
        /// The offending value.
        value: String,
    },

    /// A header value did not match the expected grammar.
    #[error("header parse error: {0}")]
    HeaderParse(String),

    /// The fragment renderer failed.
    #[error("failed to render fragment: {0}")]
    Render(String),
}

impl HtmxError {
    /// Shorthand for [`HtmxError::InvalidArgument`].
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        HtmxError::InvalidArgument(message.into())
    }

    /// HTTP status to report when the error escapes a handler.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            HtmxError::HeaderParse(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HtmxError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "htmx response aborted");
        let status = self.status_code();
        // Details stay in the log
        let reason = status.canonical_reason().unwrap_or_default();
        (status, reason).into_response()
    }
}
