use crate::outreach::client::OutreachClient;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub outreach: OutreachClient,
    /// In-memory editing sessions. Dropped with the process.
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(outreach: OutreachClient) -> Self {
        Self {
            outreach,
            sessions: SessionStore::default(),
        }
    }
}
