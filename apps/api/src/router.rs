use std::sync::Arc;

use axum::{routing::get, Router};

use doctor_cell::{doctor_routes, DoctorDirectory};
use session_cell::{session_routes, SessionAppState};

pub fn create_router(directory: Arc<DoctorDirectory>, sessions: Arc<SessionAppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic booking API is running!" }))
        .nest("/directory", doctor_routes(directory))
        .nest("/sessions", session_routes(sessions))
}
