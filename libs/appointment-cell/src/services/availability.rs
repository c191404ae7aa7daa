use chrono::NaiveDate;
use tracing::debug;

use shared_models::clinic::Appointment;
use shared_models::slot::TimeSlot;

use crate::models::{AppointmentError, DayAvailability, SlotAvailability};

/// A slot is free iff no entry of any status holds the same doctor, day and slot.
pub fn is_available(
    appointments: &[Appointment],
    doctor_id: &str,
    date: NaiveDate,
    time: TimeSlot,
) -> bool {
    !appointments
        .iter()
        .any(|appointment| appointment.occupies(doctor_id, date, time))
}

/// Days strictly before today cannot be booked.
pub fn is_bookable_date(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Every catalog slot for the day with its free/taken flag, in catalog order.
pub fn slot_availability(
    appointments: &[Appointment],
    doctor_id: &str,
    date: NaiveDate,
) -> Vec<SlotAvailability> {
    TimeSlot::all()
        .map(|time| SlotAvailability {
            time,
            available: is_available(appointments, doctor_id, date, time),
        })
        .collect()
}

/// The time page's grid. A past day is reported with every slot closed.
pub fn day_availability(
    appointments: &[Appointment],
    doctor_id: &str,
    date: NaiveDate,
    today: NaiveDate,
) -> DayAvailability {
    let bookable_date = is_bookable_date(date, today);
    let mut slots = slot_availability(appointments, doctor_id, date);

    if !bookable_date {
        slots.iter_mut().for_each(|slot| slot.available = false);
    }

    debug!(
        "Availability for {} on {}: {} free",
        doctor_id,
        date,
        slots.iter().filter(|slot| slot.available).count()
    );

    DayAvailability {
        doctor_id: doctor_id.to_string(),
        date,
        bookable_date,
        slots,
    }
}

/// Both booking guards at once: the day is not past and the slot is free.
pub fn ensure_bookable(
    appointments: &[Appointment],
    doctor_id: &str,
    date: NaiveDate,
    time: TimeSlot,
    today: NaiveDate,
) -> Result<(), AppointmentError> {
    if !is_bookable_date(date, today) {
        return Err(AppointmentError::PastDate(date));
    }

    ensure_free(appointments, doctor_id, date, time)
}

pub fn ensure_free(
    appointments: &[Appointment],
    doctor_id: &str,
    date: NaiveDate,
    time: TimeSlot,
) -> Result<(), AppointmentError> {
    if is_available(appointments, doctor_id, date, time) {
        Ok(())
    } else {
        Err(AppointmentError::SlotNotAvailable { date, time })
    }
}
