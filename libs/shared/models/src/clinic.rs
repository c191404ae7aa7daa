use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::slot::TimeSlot;

/// Patient name shown on a slot a doctor has blocked.
pub const BLOCKED_PATIENT_NAME: &str = "Bloqueado";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: String,
    pub name: String,
    pub doctors: Vec<Doctor>,
}

impl Specialty {
    pub fn doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|doctor| doctor.id == doctor_id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    Blocked,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Blocked => write!(f, "blocked"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Whether this entry occupies the given doctor/day/slot triple.
    pub fn occupies(&self, doctor_id: &str, date: NaiveDate, time: TimeSlot) -> bool {
        self.doctor_id == doctor_id && self.date == date && self.time == time
    }

    pub fn is_blocked(&self) -> bool {
        self.status == AppointmentStatus::Blocked
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == AppointmentStatus::Confirmed
    }
}
