use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use auth_cell::MockAuthService;
use doctor_cell::services::DoctorDirectory;
use shared_config::AppConfig;

use crate::handlers;
use crate::services::store::SessionStore;

/// Everything the session handlers share.
pub struct SessionAppState {
    pub store: SessionStore,
    pub directory: Arc<DoctorDirectory>,
    pub auth: MockAuthService,
}

impl SessionAppState {
    pub fn new(store: SessionStore, directory: Arc<DoctorDirectory>) -> Self {
        let auth = MockAuthService::new(store.ids());
        Self {
            store,
            directory,
            auth,
        }
    }

    pub fn from_config(config: &AppConfig, directory: Arc<DoctorDirectory>) -> Self {
        Self::new(SessionStore::from_config(config), directory)
    }
}

pub fn session_routes(state: Arc<SessionAppState>) -> Router {
    Router::new()
        .route("/", post(handlers::create_session))
        .route(
            "/{session_id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/{session_id}/view", get(handlers::get_view))
        .route("/{session_id}/availability", get(handlers::get_availability))
        .route("/{session_id}/consistency", get(handlers::get_consistency))
        .route("/{session_id}/intents", post(handlers::post_intent))
        .route("/{session_id}/login", post(handlers::login))
        .route("/{session_id}/register", post(handlers::register))
        .route("/{session_id}/logout", post(handlers::logout))
        .route("/{session_id}/selection/doctor", post(handlers::select_doctor))
        .route("/{session_id}/selection/slot", post(handlers::select_slot))
        .route("/{session_id}/confirm", post(handlers::confirm_booking))
        .route("/{session_id}/back/specialty", post(handlers::back_to_specialty))
        .route("/{session_id}/back/time", post(handlers::back_to_time))
        .route("/{session_id}/block", post(handlers::block_slot))
        .route(
            "/{session_id}/appointments/{appointment_id}/cancel",
            post(handlers::cancel_appointment),
        )
        .with_state(state)
}
