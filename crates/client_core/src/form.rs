//! Form controller: draft state, validation, and the submission cycle.

use std::sync::Arc;

use shared::{
    domain::FormField,
    protocol::{CreateGuestEntryRequest, GuestEntry},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    api::GuestbookApi,
    error::{ApiClientError, FormError},
};

pub const SUCCESS_MESSAGE: &str = "Terima kasih! Data Anda telah berhasil dikirim.";

const EVENT_CAPACITY: usize = 64;

/// In-progress form values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub organization: String,
    pub message: String,
}

impl Draft {
    pub fn new(
        name: impl Into<String>,
        organization: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            organization: organization.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Organization => &self.organization,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Organization => self.organization = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.organization.is_empty() && self.message.is_empty()
    }

    /// Required fields that are empty after trimming.
    pub fn missing_required(&self) -> Vec<FormField> {
        [FormField::Name, FormField::Organization]
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn to_request(&self) -> Result<CreateGuestEntryRequest, FormError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(FormError::Validation { missing });
        }
        Ok(CreateGuestEntryRequest::from_form(
            &self.name,
            &self.organization,
            &self.message,
        ))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone)]
pub enum FormEvent {
    SubmittingChanged(bool),
    Notice(Notice),
    Submitted(GuestEntry),
}

/// Point-in-time copy of the controller state for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub draft: Draft,
    pub phase: FormPhase,
    pub notice: Option<Notice>,
}

#[derive(Default)]
struct FormState {
    draft: Draft,
    phase: FormPhase,
    last_notice: Option<Notice>,
}

pub struct FormController {
    api: Arc<dyn GuestbookApi>,
    state: Arc<Mutex<FormState>>,
    events: broadcast::Sender<FormEvent>,
}

impl FormController {
    pub fn new(api: Arc<dyn GuestbookApi>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            state: Arc::new(Mutex::new(FormState::default())),
            events,
        }
    }

    pub async fn update_field(&self, field: FormField, value: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.draft.set(field, value.into());
        debug!(field = %field, "form field updated");
    }

    pub async fn draft(&self) -> Draft {
        self.state.lock().await.draft.clone()
    }

    pub async fn phase(&self) -> FormPhase {
        self.state.lock().await.phase
    }

    pub async fn is_submitting(&self) -> bool {
        self.phase().await == FormPhase::Submitting
    }

    pub async fn last_notice(&self) -> Option<Notice> {
        self.state.lock().await.last_notice.clone()
    }

    pub async fn dismiss_notice(&self) -> Option<Notice> {
        self.state.lock().await.last_notice.take()
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let state = self.state.lock().await;
        FormSnapshot {
            draft: state.draft.clone(),
            phase: state.phase,
            notice: state.last_notice.clone(),
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    /// Runs one submission cycle. The state lock is released while the
    /// request is in flight; a concurrent call during that window is rejected.
    /// Must be called within a tokio runtime.
    pub async fn submit(&self) -> Result<GuestEntry, FormError> {
        let request = {
            let mut state = self.state.lock().await;
            if state.phase == FormPhase::Submitting {
                debug!("form: submit ignored while a submission is in flight");
                return Err(FormError::SubmissionInFlight);
            }
            let validated = state.draft.to_request();
            match validated {
                Ok(request) => {
                    state.phase = FormPhase::Submitting;
                    request
                }
                Err(err) => {
                    let notice = Notice::error(err.notice_message());
                    state.last_notice = Some(notice.clone());
                    drop(state);
                    debug!(error = %err, "form: validation failed");
                    self.emit(FormEvent::Notice(notice));
                    return Err(err);
                }
            }
        };
        self.emit(FormEvent::SubmittingChanged(true));
        info!(
            has_message = request.message.is_some(),
            "form: submitting guest entry"
        );

        // The request and its bookkeeping run to completion even if this
        // future is dropped, so the phase always returns to Idle.
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let in_flight = tokio::spawn(async move {
            let result = api.create_entry(&request).await;
            complete_submission(&state, &events, result).await
        });

        match in_flight.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "form: submission task failed");
                self.state.lock().await.phase = FormPhase::Idle;
                emit(&self.events, FormEvent::SubmittingChanged(false));
                Err(FormError::Api(ApiClientError::network(err.to_string())))
            }
        }
    }

    fn emit(&self, event: FormEvent) {
        emit(&self.events, event);
    }
}

async fn complete_submission(
    state: &Mutex<FormState>,
    events: &broadcast::Sender<FormEvent>,
    result: Result<GuestEntry, ApiClientError>,
) -> Result<GuestEntry, FormError> {
    let (outcome, notice) = {
        let mut state = state.lock().await;
        state.phase = FormPhase::Idle;
        let (outcome, notice) = match result {
            Ok(entry) => {
                state.draft = Draft::default();
                (Ok(entry), Notice::success(SUCCESS_MESSAGE))
            }
            Err(err) => {
                warn!(
                    status = ?err.status(),
                    error = err.message(),
                    "form: submission failed, draft kept"
                );
                let err = FormError::from(err);
                let notice = Notice::error(err.notice_message());
                (Err(err), notice)
            }
        };
        state.last_notice = Some(notice.clone());
        (outcome, notice)
    };

    emit(events, FormEvent::SubmittingChanged(false));
    if let Ok(entry) = &outcome {
        emit(events, FormEvent::Submitted(entry.clone()));
    }
    emit(events, FormEvent::Notice(notice));
    outcome
}

fn emit(events: &broadcast::Sender<FormEvent>, event: FormEvent) {
    // No subscribers is fine; the latest notice is also kept in state.
    let _ = events.send(event);
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
