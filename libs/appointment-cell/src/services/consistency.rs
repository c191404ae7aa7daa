// The ledger accepts any write, so clashes can only be found after the fact.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use shared_models::clinic::Appointment;
use shared_models::slot::TimeSlot;

use crate::models::DoubleBooking;

/// Every doctor/day/slot held by more than one entry, ordered by doctor, day, slot.
pub fn find_double_bookings(appointments: &[Appointment]) -> Vec<DoubleBooking> {
    let mut claims: BTreeMap<(&str, NaiveDate, TimeSlot), Vec<String>> = BTreeMap::new();

    for appointment in appointments {
        claims
            .entry((appointment.doctor_id.as_str(), appointment.date, appointment.time))
            .or_default()
            .push(appointment.id.clone());
    }

    let clashes: Vec<DoubleBooking> = claims
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|((doctor_id, date, time), appointment_ids)| DoubleBooking {
            doctor_id: doctor_id.to_string(),
            date,
            time,
            appointment_ids,
        })
        .collect();

    if !clashes.is_empty() {
        warn!("Found {} double-booked slots", clashes.len());
    }

    clashes
}
