use serde::{Deserialize, Serialize};

/// Error body returned by the guestbook backend on non-success statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// The error text, if the backend sent a non-empty one.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}
