//! Error types surfaced by the API client and the form controller.

use shared::{domain::FormField, error::ApiErrorBody};
use thiserror::Error;

/// Fallback notice text when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Terjadi kesalahan yang tidak diketahui";

/// Notice text for a draft missing required fields.
pub const VALIDATION_MESSAGE: &str = "Mohon lengkapi semua field!";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiClientError {
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Decode(String),
}

impl ApiClientError {
    /// Maps a non-success response to an error, preferring the backend's own
    /// `error` text over the status line.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|body| body.message().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        Self::Api { status, message }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Human-readable message, never empty.
    pub fn message(&self) -> &str {
        let message = match self {
            Self::Api { message, .. } => message,
            Self::Network(message) | Self::Decode(message) => message,
        };
        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation { missing: Vec<FormField> },
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error(transparent)]
    Api(#[from] ApiClientError),
}

impl FormError {
    /// Text shown to the visitor for this failure.
    pub fn notice_message(&self) -> &str {
        match self {
            Self::Validation { .. } => VALIDATION_MESSAGE,
            Self::SubmissionInFlight => "Data sedang dikirim, mohon tunggu.",
            Self::Api(err) => err.message(),
        }
    }
}
