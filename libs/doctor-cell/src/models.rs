use serde::Serialize;
use thiserror::Error;

use shared_models::clinic::{Doctor, Specialty};
use shared_models::error::AppError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Specialty not found: {0}")]
    SpecialtyNotFound(String),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Doctor {doctor_id} does not practice {specialty_id}")]
    DoctorNotInSpecialty {
        doctor_id: String,
        specialty_id: String,
    },
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::SpecialtyNotFound(_) | DirectoryError::DoctorNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            DirectoryError::DoctorNotInSpecialty { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

/// A doctor together with the specialty that lists them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DoctorWithSpecialty {
    pub doctor: Doctor,
    pub specialty: SpecialtySummary,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtySummary {
    pub id: String,
    pub name: String,
    pub doctor_count: usize,
}

impl From<&Specialty> for SpecialtySummary {
    fn from(specialty: &Specialty) -> Self {
        Self {
            id: specialty.id.clone(),
            name: specialty.name.clone(),
            doctor_count: specialty.doctors.len(),
        }
    }
}
