//! Client side of the digital guestbook: API client, form controller, and
//! settings.

pub mod api;
pub mod config;
pub mod error;
pub mod form;

pub use api::{GuestbookApi, HttpGuestbookApi, MissingGuestbookApi};
pub use config::{load_settings, Settings};
pub use error::{ApiClientError, FormError, GENERIC_ERROR_MESSAGE, VALIDATION_MESSAGE};
pub use form::{
    Draft, FormController, FormEvent, FormPhase, FormSnapshot, Notice, NoticeKind,
    SUCCESS_MESSAGE,
};

#[cfg(test)]
#[path = "tests/mock_server.rs"]
mod mock_server;
