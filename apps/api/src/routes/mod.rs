pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/fields",
            patch(handlers::handle_update_field),
        )
        .route(
            "/api/v1/sessions/:id/smart-paste",
            post(handlers::handle_smart_paste),
        )
        .route(
            "/api/v1/sessions/:id/drafts",
            post(handlers::handle_generate_drafts),
        )
        .route(
            "/api/v1/sessions/:id/message",
            post(handlers::handle_generate_message),
        )
        .route(
            "/api/v1/sessions/:id/reset",
            post(handlers::handle_reset_session),
        )
        .with_state(state)
}
