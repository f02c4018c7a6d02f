//! HTTP client for the guestbook backend.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{CreateGuestEntryRequest, GuestEntry, GUEST_ENTRIES_PATH};
use tracing::{info, warn};

use crate::{config::Settings, error::ApiClientError};

#[async_trait]
pub trait GuestbookApi: Send + Sync {
    /// Creates one guest entry. Single attempt, no retry.
    async fn create_entry(
        &self,
        request: &CreateGuestEntryRequest,
    ) -> Result<GuestEntry, ApiClientError>;
}

pub struct MissingGuestbookApi;

#[async_trait]
impl GuestbookApi for MissingGuestbookApi {
    async fn create_entry(
        &self,
        _request: &CreateGuestEntryRequest,
    ) -> Result<GuestEntry, ApiClientError> {
        Err(ApiClientError::network("guestbook backend is unavailable"))
    }
}

#[derive(Debug, Clone)]
pub struct HttpGuestbookApi {
    http: Client,
    base_url: String,
}

impl HttpGuestbookApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Uses a caller-built client, e.g. one carrying a request timeout.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn entries_url(&self) -> String {
        format!("{}{GUEST_ENTRIES_PATH}", self.base_url)
    }
}

#[async_trait]
impl GuestbookApi for HttpGuestbookApi {
    async fn create_entry(
        &self,
        request: &CreateGuestEntryRequest,
    ) -> Result<GuestEntry, ApiClientError> {
        let url = self.entries_url();
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(url = %url, error = %err, "guestbook: request failed before response");
                ApiClientError::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let err = ApiClientError::from_status(status.as_u16(), &body);
            warn!(
                url = %url,
                status = status.as_u16(),
                error = err.message(),
                "guestbook: backend rejected entry"
            );
            return Err(err);
        }

        let body = response.bytes().await?;
        let entry: GuestEntry = serde_json::from_slice(&body).map_err(|err| {
            warn!(url = %url, error = %err, "guestbook: unexpected response body");
            ApiClientError::Decode(format!("invalid response from server: {err}"))
        })?;
        info!(entry_id = entry.id.0, "guestbook: entry created");
        Ok(entry)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
