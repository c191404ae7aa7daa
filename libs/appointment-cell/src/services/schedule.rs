use chrono::NaiveDate;

use shared_models::clinic::Appointment;
use shared_models::slot::TimeSlot;
use shared_utils::dates::format_pt_br;

use crate::models::{DoctorSchedule, ScheduleRow, ScheduleSummary, SlotState};

/// One row per catalog slot for the doctor's day, recomputed from the list.
///
/// When two entries claim the same slot the earlier one wins.
pub fn doctor_schedule(
    appointments: &[Appointment],
    doctor_id: &str,
    date: NaiveDate,
    today: NaiveDate,
) -> DoctorSchedule {
    let day: Vec<&Appointment> = doctor_entries(appointments, doctor_id)
        .filter(|appointment| appointment.date == date)
        .collect();

    let rows = TimeSlot::all()
        .map(|time| {
            let matched = day.iter().find(|appointment| appointment.time == time);
            schedule_row(time, matched.copied())
        })
        .collect();

    DoctorSchedule {
        doctor_id: doctor_id.to_string(),
        date,
        date_label: format_pt_br(date),
        summary: schedule_summary(appointments, doctor_id, today),
        rows,
    }
}

fn schedule_row(time: TimeSlot, appointment: Option<&Appointment>) -> ScheduleRow {
    match appointment {
        None => ScheduleRow {
            time,
            state: SlotState::Free,
            label: SlotState::Free.label().to_string(),
            patient_name: None,
            appointment_id: None,
            can_block: true,
            can_cancel: false,
        },
        Some(appointment) => {
            let state = SlotState::from(appointment.status);
            ScheduleRow {
                time,
                state,
                label: state.label().to_string(),
                patient_name: Some(appointment.patient_name.clone()),
                appointment_id: Some(appointment.id.clone()),
                can_block: false,
                can_cancel: true,
            }
        }
    }
}

/// Counters shown above the schedule. Blocked and confirmed span all dates.
pub fn schedule_summary(
    appointments: &[Appointment],
    doctor_id: &str,
    today: NaiveDate,
) -> ScheduleSummary {
    doctor_entries(appointments, doctor_id)
        .fold(ScheduleSummary::default(), |mut summary, appointment| {
            if appointment.date == today {
                summary.today_count += 1;
            }
            if appointment.is_blocked() {
                summary.blocked_count += 1;
            }
            if appointment.is_confirmed() {
                summary.confirmed_count += 1;
            }
            summary
        })
}

fn doctor_entries<'a>(
    appointments: &'a [Appointment],
    doctor_id: &'a str,
) -> impl Iterator<Item = &'a Appointment> {
    appointments
        .iter()
        .filter(move |appointment| appointment.doctor_id == doctor_id)
}
