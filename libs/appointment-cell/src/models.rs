// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::clinic::AppointmentStatus;
use shared_models::error::AppError;
use shared_models::slot::TimeSlot;

// ==============================================================================
// AVAILABILITY
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotAvailability {
    pub time: TimeSlot,
    pub available: bool,
}

/// The slot grid a patient picks from for one doctor and day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub doctor_id: String,
    pub date: NaiveDate,
    /// False for days before today; every slot is then reported unavailable.
    pub bookable_date: bool,
    pub slots: Vec<SlotAvailability>,
}

impl DayAvailability {
    pub fn free_slots(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.available)
            .map(|slot| slot.time)
    }
}

// ==============================================================================
// DOCTOR SCHEDULE
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Free,
    Booked,
    Blocked,
}

impl SlotState {
    /// Badge text shown in the schedule table.
    pub fn label(&self) -> &'static str {
        match self {
            SlotState::Free => "Livre",
            SlotState::Booked => "Agendado",
            SlotState::Blocked => "Bloqueado",
        }
    }
}

impl From<AppointmentStatus> for SlotState {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Confirmed => SlotState::Booked,
            AppointmentStatus::Blocked => SlotState::Blocked,
        }
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub time: TimeSlot,
    pub state: SlotState,
    pub label: String,
    pub patient_name: Option<String>,
    pub appointment_id: Option<String>,
    pub can_block: bool,
    pub can_cancel: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    /// All of the doctor's entries dated today, any status.
    pub today_count: usize,
    pub blocked_count: usize,
    pub confirmed_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSchedule {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub date_label: String,
    pub summary: ScheduleSummary,
    pub rows: Vec<ScheduleRow>,
}

impl DoctorSchedule {
    pub fn row(&self, time: TimeSlot) -> Option<&ScheduleRow> {
        self.rows.iter().find(|row| row.time == time)
    }
}

// ==============================================================================
// CONSISTENCY
// ==============================================================================

/// More than one entry claiming the same doctor/day/slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DoubleBooking {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub appointment_ids: Vec<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Slot {time} on {date} is not available")]
    SlotNotAvailable { date: NaiveDate, time: TimeSlot },

    #[error("Cannot book a past date: {0}")]
    PastDate(NaiveDate),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::SlotNotAvailable { .. } => AppError::Conflict(err.to_string()),
            AppointmentError::PastDate(_) => AppError::ValidationError(err.to_string()),
        }
    }
}
