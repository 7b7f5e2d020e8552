//! Axum route handlers for the Session API.

use std::future::Future;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::draft::GenerationResult;
use crate::models::lead::LeadField;
use crate::session::{Operation, OutreachSession, SessionView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FieldUpdateRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SmartPasteRequest {
    pub raw_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.sessions.create().await)
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.view(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/sessions/:id/fields
///
/// Overwrites one form field. Accepts canonical and single-lead field names.
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FieldUpdateRequest>,
) -> Result<Json<SessionView>, AppError> {
    let field: LeadField = request
        .field
        .parse()
        .map_err(|e: crate::models::lead::UnknownField| AppError::Validation(e.to_string()))?;

    let view = state
        .sessions
        .update(id, |session| {
            session.update_field(field, request.value);
            session.view()
        })
        .await?;

    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/smart-paste
///
/// Extracts form fields from pasted text and merges them. Blank text is a no-op.
pub async fn handle_smart_paste(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SmartPasteRequest>,
) -> Result<Json<SessionView>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Ok(Json(state.sessions.view(id).await?));
    }

    state
        .sessions
        .update(id, |session| session.begin(Operation::SmartPaste))
        .await??;

    let task_state = state.clone();
    let view = run_detached(&state, id, async move {
        let outcome = task_state.outreach.parse_lead_row(&request.raw_text).await;
        task_state
            .sessions
            .update(id, |session| {
                session.finish_smart_paste(outcome);
                session.view()
            })
            .await
    })
    .await?;

    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/drafts
///
/// Generates subject/body drafts for both leads. Failures come back as a notice.
pub async fn handle_generate_drafts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let snapshot = state
        .sessions
        .update(id, |session| session.begin(Operation::Drafting))
        .await??;

    let task_state = state.clone();
    let view = run_detached(&state, id, async move {
        let outcome = task_state
            .outreach
            .generate_drafts_for_lead_pair(&snapshot)
            .await
            .map(GenerationResult::Drafts);
        task_state
            .sessions
            .update(id, |session| {
                session.finish_generation(outcome);
                session.view()
            })
            .await
    })
    .await?;

    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/message
///
/// Generates one free-text email for the first lead.
pub async fn handle_generate_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let snapshot = state
        .sessions
        .update(id, |session| session.begin(Operation::Messaging))
        .await??;

    let task_state = state.clone();
    let view = run_detached(&state, id, async move {
        let outcome = task_state
            .outreach
            .generate_draft_for_single_lead(&snapshot)
            .await
            .map(GenerationResult::Message);
        task_state
            .sessions
            .update(id, |session| {
                session.finish_generation(outcome);
                session.view()
            })
            .await
    })
    .await?;

    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(id, |session| {
            session.reset();
            session.view()
        })
        .await?;

    Ok(Json(view))
}

/// Runs a backend call and its write-back on a separate task, so the session
/// is finished even if the client disconnects and this handler is dropped.
/// A task that dies without finishing releases the session.
async fn run_detached<F>(state: &AppState, id: Uuid, task: F) -> Result<SessionView, AppError>
where
    F: Future<Output = Result<SessionView, AppError>> + Send + 'static,
{
    match tokio::spawn(task).await {
        Ok(view) => view,
        Err(join_error) => {
            state.sessions.update(id, OutreachSession::abandon).await?;
            Err(AppError::Internal(anyhow::Error::new(join_error).context(format!(
                "Operation task for session {id} did not finish"
            ))))
        }
    }
}
