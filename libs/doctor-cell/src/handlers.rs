use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_models::slot::TimeSlot;

use crate::services::DoctorDirectory;

#[axum::debug_handler]
pub async fn list_specialties(
    State(directory): State<Arc<DoctorDirectory>>,
) -> Json<Value> {
    let specialties = directory.specialties();

    Json(json!({
        "specialties": specialties,
        "total": specialties.len()
    }))
}

#[axum::debug_handler]
pub async fn get_specialty(
    State(directory): State<Arc<DoctorDirectory>>,
    Path(specialty_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let specialty = directory.specialty(&specialty_id)?;

    Ok(Json(json!(specialty)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(directory): State<Arc<DoctorDirectory>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor = directory.doctor_with_specialty(&doctor_id)?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn list_slots() -> Json<Value> {
    let slots: Vec<TimeSlot> = TimeSlot::all().collect();

    Json(json!({
        "slots": slots,
        "total": slots.len()
    }))
}
