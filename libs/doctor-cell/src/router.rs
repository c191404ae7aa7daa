use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::DoctorDirectory;

pub fn doctor_routes(directory: Arc<DoctorDirectory>) -> Router {
    Router::new()
        .route("/specialties", get(handlers::list_specialties))
        .route("/specialties/{specialty_id}", get(handlers::get_specialty))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor))
        .route("/slots", get(handlers::list_slots))
        .with_state(directory)
}
