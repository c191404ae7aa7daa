use chrono::NaiveDate;
use serde::Serialize;

use appointment_cell::models::{DayAvailability, DoctorSchedule};
use appointment_cell::services::{day_availability, doctor_schedule};
use doctor_cell::services::DoctorDirectory;
use shared_models::auth::User;
use shared_models::clinic::{Doctor, Specialty};
use shared_models::slot::TimeSlot;
use shared_utils::dates::format_pt_br;

use crate::models::{Page, SessionState};

/// Read-model for whichever page the session is on.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageView {
    Login,
    Specialty {
        user: User,
        specialties: Vec<Specialty>,
    },
    #[serde(rename_all = "camelCase")]
    Time {
        user: User,
        specialty: Specialty,
        doctor: Doctor,
        today: NaiveDate,
        /// Present once a date has been picked.
        availability: Option<DayAvailability>,
    },
    #[serde(rename_all = "camelCase")]
    Confirmation {
        user: User,
        specialty: Specialty,
        doctor: Doctor,
        date: NaiveDate,
        time: TimeSlot,
        summary: String,
    },
    DoctorSchedule {
        user: User,
        schedule: DoctorSchedule,
    },
}

/// Projects the session onto its current page. `date` is the day the view has
/// picked: the time page's calendar or the schedule's; the schedule falls back
/// to today.
pub fn page_view(
    state: &SessionState,
    directory: &DoctorDirectory,
    today: NaiveDate,
    date: Option<NaiveDate>,
) -> PageView {
    let appointments = state.appointments.as_slice();

    match &state.page {
        Page::Login => PageView::Login,
        Page::Specialty { user } => PageView::Specialty {
            user: user.clone(),
            specialties: directory.specialties().to_vec(),
        },
        Page::Time {
            user,
            specialty,
            doctor,
        } => PageView::Time {
            user: user.clone(),
            specialty: specialty.clone(),
            doctor: doctor.clone(),
            today,
            availability: date.map(|date| day_availability(appointments, &doctor.id, date, today)),
        },
        Page::Confirmation {
            user,
            specialty,
            doctor,
            date,
            time,
        } => PageView::Confirmation {
            user: user.clone(),
            specialty: specialty.clone(),
            doctor: doctor.clone(),
            date: *date,
            time: *time,
            summary: booking_summary(*date, *time),
        },
        Page::DoctorSchedule { user } => PageView::DoctorSchedule {
            user: user.clone(),
            schedule: doctor_schedule(appointments, &user.id, date.unwrap_or(today), today),
        },
    }
}

/// "15/11/2025 às 10:00"
pub fn booking_summary(date: NaiveDate, time: TimeSlot) -> String {
    format!("{} às {}", format_pt_br(date), time)
}
