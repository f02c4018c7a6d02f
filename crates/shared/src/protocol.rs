use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::EntryId;

/// Path of the guest entry collection on the backend.
pub const GUEST_ENTRIES_PATH: &str = "/api/umum";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGuestEntryRequest {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "nama_instansi")]
    pub organization_name: String,
    #[serde(rename = "pesan", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CreateGuestEntryRequest {
    /// Builds a request from raw form values. Every value is trimmed and a
    /// message that trims to nothing is left out.
    pub fn from_form(name: &str, organization_name: &str, message: &str) -> Self {
        let message = message.trim();
        Self {
            name: name.trim().to_string(),
            organization_name: organization_name.trim().to_string(),
            message: (!message.is_empty()).then(|| message.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestEntry {
    pub id: EntryId,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "nama_instansi")]
    pub organization_name: String,
    #[serde(rename = "pesan", default)]
    pub message: Option<String>,
    pub created_at: String,
}

impl GuestEntry {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}
