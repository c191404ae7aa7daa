use std::sync::Arc;

use axum::extract::{Path, State};
use assert_matches::assert_matches;

use doctor_cell::handlers::*;
use doctor_cell::services::DoctorDirectory;
use shared_models::error::AppError;

fn directory() -> State<Arc<DoctorDirectory>> {
    State(Arc::new(DoctorDirectory::clinic_default()))
}

#[tokio::test]
async fn test_list_specialties_returns_whole_roster() {
    let response = list_specialties(directory()).await;

    assert_eq!(response.0["total"], 6);
    assert_eq!(response.0["specialties"][0]["name"], "Cardiologia");
    assert_eq!(response.0["specialties"][0]["doctors"][0]["specialtyId"], "s1");
}

#[tokio::test]
async fn test_get_specialty_by_id() {
    let response = get_specialty(directory(), Path("s4".to_string())).await.unwrap();

    assert_eq!(response.0["name"], "Pediatria");
    assert_eq!(response.0["doctors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_unknown_specialty_is_not_found() {
    let result = get_specialty(directory(), Path("s42".to_string())).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_get_doctor_includes_specialty_summary() {
    let response = get_doctor(directory(), Path("d11".to_string())).await.unwrap();

    assert_eq!(response.0["doctor"]["name"], "Dr. Lucas Ferreira");
    assert_eq!(response.0["specialty"]["name"], "Clínica Geral");
    assert_eq!(response.0["specialty"]["doctorCount"], 2);
}

#[tokio::test]
async fn test_list_slots_matches_catalog() {
    let response = list_slots().await;

    assert_eq!(response.0["total"], 16);
    assert_eq!(response.0["slots"][7], "11:30");
    assert_eq!(response.0["slots"][8], "14:00");
}
