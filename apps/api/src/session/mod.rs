//! Presentation layer: one in-memory editing session per user.
//!
//! A session owns its lead form for its whole lifetime. Generation calls get
//! a snapshot; only the smart-paste merge writes results back into the form.
//! The session map lock is never held across a backend call.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::leads::patch::LeadPatch;
use crate::models::draft::GenerationResult;
use crate::models::lead::{GenerationRequest, LeadField, LeadSlot};
use crate::outreach::client::OutreachError;

pub mod handlers;

const INTERRUPTED_NOTICE: &str = "The last request was interrupted. Please try again.";

/// The call a session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Drafting,
    Messaging,
    SmartPaste,
}

impl Operation {
    fn produces_result(self) -> bool {
        matches!(self, Operation::Drafting | Operation::Messaging)
    }
}

/// One rendered draft, ready to copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftCard {
    pub lead: LeadSlot,
    pub title: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Everything the front end needs to render a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub form: GenerationRequest,
    pub in_progress: Option<Operation>,
    pub result: Option<GenerationResult>,
    pub cards: Vec<DraftCard>,
    pub notice: Option<String>,
}

#[derive(Debug)]
pub struct OutreachSession {
    id: Uuid,
    form: GenerationRequest,
    in_progress: Option<Operation>,
    result: Option<GenerationResult>,
    notice: Option<String>,
}

impl OutreachSession {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            form: GenerationRequest::default(),
            in_progress: None,
            result: None,
            notice: None,
        }
    }

    pub fn update_field(&mut self, field: LeadField, value: String) {
        self.form.update_field(field, value);
    }

    /// Marks `operation` as in flight and returns the form snapshot to send.
    /// Fails while another operation is outstanding.
    pub fn begin(&mut self, operation: Operation) -> Result<GenerationRequest, AppError> {
        if let Some(current) = self.in_progress {
            return Err(AppError::Conflict(format!(
                "Session {} is busy ({current:?} in progress)",
                self.id
            )));
        }

        self.in_progress = Some(operation);
        self.notice = None;
        if operation.produces_result() {
            self.result = None;
        }
        Ok(self.form.clone())
    }

    /// Stores a generation outcome. A failure leaves no result behind.
    pub fn finish_generation(&mut self, outcome: Result<GenerationResult, OutreachError>) {
        self.in_progress = None;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
            }
            Err(e) => {
                error!("Generation failed for session {}: {e}", self.id);
                self.result = None;
                self.notice = Some(e.user_message().to_string());
            }
        }
    }

    /// Merges a smart-paste patch. An empty patch changes nothing.
    pub fn finish_smart_paste(&mut self, outcome: Result<LeadPatch, OutreachError>) {
        self.in_progress = None;
        match outcome {
            Ok(patch) if patch.is_empty() => {
                info!("Smart paste produced no fields for session {}", self.id);
            }
            Ok(patch) => {
                self.form.merge(&patch);
                info!("Smart paste merged {} fields into session {}", patch.len(), self.id);
            }
            Err(e) => {
                error!("Smart paste failed for session {}: {e}", self.id);
                self.notice = Some(e.user_message().to_string());
            }
        }
    }

    /// Releases a session whose operation ended without an outcome.
    pub fn abandon(&mut self) {
        if let Some(operation) = self.in_progress.take() {
            error!("{operation:?} for session {} ended without an outcome", self.id);
            self.notice = Some(INTERRUPTED_NOTICE.to_string());
        }
    }

    /// Clears the form, result and notice. An in-flight call still completes.
    pub fn reset(&mut self) {
        self.form = GenerationRequest::default();
        self.result = None;
        self.notice = None;
    }

    /// One card per lead with a non-empty draft body.
    pub fn cards(&self) -> Vec<DraftCard> {
        let Some(GenerationResult::Drafts(drafts)) = &self.result else {
            return Vec::new();
        };

        LeadSlot::ALL
            .into_iter()
            .filter(|slot| !drafts.get(*slot).is_empty())
            .map(|slot| {
                let lead = self.form.lead(slot);
                let draft = drafts.get(slot);
                let name = lead.full_name();
                DraftCard {
                    lead: slot,
                    title: if name.is_empty() {
                        format!("Lead {}", slot.number())
                    } else {
                        name
                    },
                    recipient: lead.email_address.clone(),
                    subject: draft.subject.clone(),
                    body: draft.body.clone(),
                }
            })
            .collect()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            form: self.form.clone(),
            in_progress: self.in_progress,
            result: self.result.clone(),
            cards: self.cards(),
            notice: self.notice.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session store
// ────────────────────────────────────────────────────────────────────────────

/// Process-local session map. Nothing here outlives the process.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, OutreachSession>>>,
}

impl SessionStore {
    pub async fn create(&self) -> SessionView {
        let session = OutreachSession::new(Uuid::new_v4());
        let view = session.view();
        self.sessions.write().await.insert(view.session_id, session);
        info!("Created session {}", view.session_id);
        view
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(OutreachSession::view)
            .ok_or_else(|| session_not_found(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.sessions.write().await.remove(&id);
        if removed.is_none() {
            return Err(session_not_found(id));
        }
        info!("Removed session {id}");
        Ok(())
    }

    /// Runs `f` against one session under the write lock.
    pub async fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut OutreachSession) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        Ok(f(session))
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
