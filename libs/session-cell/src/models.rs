use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use appointment_cell::services::AppointmentLedger;
use auth_cell::{LoginForm, RegisterForm};
use shared_models::auth::User;
use shared_models::clinic::{Appointment, Doctor, Specialty};
use shared_models::error::AppError;
use shared_models::slot::TimeSlot;
use shared_utils::dates::deserialize_calendar_date;

// ==============================================================================
// PAGES
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Login,
    Specialty,
    Time,
    Confirmation,
    DoctorSchedule,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKind::Login => write!(f, "login"),
            PageKind::Specialty => write!(f, "specialty"),
            PageKind::Time => write!(f, "time"),
            PageKind::Confirmation => write!(f, "confirmation"),
            PageKind::DoctorSchedule => write!(f, "doctor-schedule"),
        }
    }
}

/// The current page and exactly the selections it needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Login,
    Specialty {
        user: User,
    },
    Time {
        user: User,
        specialty: Specialty,
        doctor: Doctor,
    },
    Confirmation {
        user: User,
        specialty: Specialty,
        doctor: Doctor,
        date: NaiveDate,
        time: TimeSlot,
    },
    DoctorSchedule {
        user: User,
    },
}

impl Page {
    pub fn kind(&self) -> PageKind {
        match self {
            Page::Login => PageKind::Login,
            Page::Specialty { .. } => PageKind::Specialty,
            Page::Time { .. } => PageKind::Time,
            Page::Confirmation { .. } => PageKind::Confirmation,
            Page::DoctorSchedule { .. } => PageKind::DoctorSchedule,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Page::Login => None,
            Page::Specialty { user }
            | Page::Time { user, .. }
            | Page::Confirmation { user, .. }
            | Page::DoctorSchedule { user } => Some(user),
        }
    }

    pub fn selections(&self) -> Selections {
        match self {
            Page::Time {
                specialty, doctor, ..
            } => Selections {
                specialty: Some(specialty.clone()),
                doctor: Some(doctor.clone()),
                ..Selections::default()
            },
            Page::Confirmation {
                specialty,
                doctor,
                date,
                time,
                ..
            } => Selections {
                specialty: Some(specialty.clone()),
                doctor: Some(doctor.clone()),
                date: Some(*date),
                time: Some(*time),
            },
            _ => Selections::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selections {
    pub specialty: Option<Specialty>,
    pub doctor: Option<Doctor>,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
}

impl Selections {
    pub fn is_empty(&self) -> bool {
        self.specialty.is_none() && self.doctor.is_none() && self.date.is_none() && self.time.is_none()
    }
}

// ==============================================================================
// SESSION STATE
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub page: Page,
    pub appointments: AppointmentLedger,
}

impl SessionState {
    /// Login page, nobody signed in, the given appointments.
    pub fn new(appointments: AppointmentLedger) -> Self {
        Self {
            page: Page::Login,
            appointments,
        }
    }

    pub fn seeded() -> Self {
        Self::new(AppointmentLedger::seeded())
    }

    pub fn kind(&self) -> PageKind {
        self.page.kind()
    }

    pub fn user(&self) -> Option<&User> {
        self.page.user()
    }

    pub fn snapshot(&self, session_id: Uuid) -> SessionSnapshot {
        SessionSnapshot {
            session_id,
            page: self.kind(),
            user: self.user().cloned(),
            selections: self.page.selections(),
            appointments: self.appointments.as_slice().to_vec(),
        }
    }
}

/// What the view layer reads: page tag, user, selections, all appointments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub page: PageKind,
    pub user: Option<User>,
    pub selections: Selections,
    pub appointments: Vec<Appointment>,
}

// ==============================================================================
// INTENTS
// ==============================================================================

/// Everything a view can ask of the session root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Login(User),
    Logout,
    SelectSpecialtyAndDoctor { specialty: Specialty, doctor: Doctor },
    SelectDateTime { date: NaiveDate, time: TimeSlot },
    ConfirmBooking,
    BackToSpecialty,
    BackToTime,
    BlockSlot { date: NaiveDate, time: TimeSlot },
    CancelAppointment { appointment_id: String },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Login(_) => "login",
            Intent::Logout => "logout",
            Intent::SelectSpecialtyAndDoctor { .. } => "selectSpecialtyAndDoctor",
            Intent::SelectDateTime { .. } => "selectDateTime",
            Intent::ConfirmBooking => "confirmBooking",
            Intent::BackToSpecialty => "backToSpecialty",
            Intent::BackToTime => "backToTime",
            Intent::BlockSlot { .. } => "blockSlot",
            Intent::CancelAppointment { .. } => "cancelAppointment",
        }
    }
}

/// Wire form of an intent. Directory entries travel as ids and login as the
/// raw form; the handler resolves both before reducing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IntentRequest {
    Login(LoginForm),
    Register(RegisterForm),
    Logout,
    SelectSpecialtyAndDoctor(DoctorSelectionRequest),
    SelectDateTime(SlotRequest),
    ConfirmBooking,
    BackToSpecialty,
    BackToTime,
    BlockSlot(SlotRequest),
    #[serde(rename_all = "camelCase")]
    CancelAppointment {
        appointment_id: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSelectionRequest {
    pub specialty_id: String,
    pub doctor_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotRequest {
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    pub time: TimeSlot,
}

// ==============================================================================
// OUTCOMES
// ==============================================================================

/// Result of reducing one intent. Guards never fail; they ignore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Applied {
        page: PageKind,
    },
    Ignored {
        reason: IgnoreReason,
        message: String,
    },
}

impl Outcome {
    pub fn applied(page: PageKind) -> Self {
        Outcome::Applied { page }
    }

    pub fn ignored(reason: IgnoreReason) -> Self {
        Outcome::Ignored {
            message: reason.to_string(),
            reason,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IgnoreReason {
    NotOnThisPage { page: PageKind },
    NotADoctor,
    DoctorNotInSpecialty,
    PastDate,
    SlotTaken,
    UnknownAppointment,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::NotOnThisPage { page } => write!(f, "Not available on the {} page", page),
            IgnoreReason::NotADoctor => write!(f, "Only doctors can block slots"),
            IgnoreReason::DoctorNotInSpecialty => write!(f, "Doctor is not listed under that specialty"),
            IgnoreReason::PastDate => write!(f, "Date is in the past"),
            IgnoreReason::SlotTaken => write!(f, "Slot is not available"),
            IgnoreReason::UnknownAppointment => write!(f, "No appointment with that id"),
        }
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => AppError::NotFound(err.to_string()),
        }
    }
}
