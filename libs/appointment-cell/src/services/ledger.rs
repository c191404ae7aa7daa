use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use shared_models::auth::User;
use shared_models::clinic::{
    Appointment, AppointmentStatus, Doctor, Specialty, BLOCKED_PATIENT_NAME,
};
use shared_models::slot::{TimeSlot, SLOT_CATALOG};

use crate::models::AppointmentError;

/// A session's appointments, in insertion order.
///
/// Writes never check for clashes; callers run the availability rule first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentLedger {
    entries: Vec<Appointment>,
}

impl AppointmentLedger {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The demo booking every fresh session starts with.
    pub fn seeded() -> Self {
        Self {
            entries: vec![Appointment {
                id: "1".to_string(),
                patient_id: "1".to_string(),
                patient_name: "João Silva".to_string(),
                doctor_id: "d1".to_string(),
                doctor_name: "Dr. Carlos Santos".to_string(),
                specialty: "Cardiologia".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap_or_default(),
                // 10:00
                time: SLOT_CATALOG[4],
                status: AppointmentStatus::Confirmed,
            }],
        }
    }

    pub fn as_slice(&self) -> &[Appointment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, appointment_id: &str) -> Option<&Appointment> {
        self.entries
            .iter()
            .find(|appointment| appointment.id == appointment_id)
    }

    pub fn append(&mut self, appointment: Appointment) {
        debug!(
            "Appending {} appointment {} for doctor {} at {} {}",
            appointment.status, appointment.id, appointment.doctor_id, appointment.date, appointment.time
        );
        self.entries.push(appointment);
    }

    /// Removes every entry carrying the id and returns the first one.
    pub fn remove(&mut self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        let position = self
            .entries
            .iter()
            .position(|appointment| appointment.id == appointment_id)
            .ok_or_else(|| AppointmentError::NotFound(appointment_id.to_string()))?;

        let removed = self.entries.remove(position);
        self.entries.retain(|appointment| appointment.id != appointment_id);
        debug!("Removed appointment {}", appointment_id);

        Ok(removed)
    }
}

/// A confirmed booking copied from the patient's selections.
pub fn new_booking(
    id: String,
    patient: &User,
    specialty: &Specialty,
    doctor: &Doctor,
    date: NaiveDate,
    time: TimeSlot,
) -> Appointment {
    Appointment {
        id,
        patient_id: patient.id.clone(),
        patient_name: patient.name.clone(),
        doctor_id: doctor.id.clone(),
        doctor_name: doctor.name.clone(),
        specialty: specialty.name.clone(),
        date,
        time,
        status: AppointmentStatus::Confirmed,
    }
}

/// A placeholder a doctor puts on their own slot.
pub fn new_block(id: String, doctor: &User, date: NaiveDate, time: TimeSlot) -> Appointment {
    Appointment {
        id,
        patient_id: String::new(),
        patient_name: BLOCKED_PATIENT_NAME.to_string(),
        doctor_id: doctor.id.clone(),
        doctor_name: doctor.name.clone(),
        specialty: String::new(),
        date,
        time,
        status: AppointmentStatus::Blocked,
    }
}
