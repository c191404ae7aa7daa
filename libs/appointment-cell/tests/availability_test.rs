use chrono::NaiveDate;

use appointment_cell::services::{
    day_availability, doctor_schedule, is_available, new_block, AppointmentLedger,
};
use appointment_cell::SlotState;
use shared_models::slot::TimeSlot;
use shared_utils::test_utils::{TestDates, TestUser};

fn slot(label: &str) -> TimeSlot {
    label.parse().unwrap()
}

#[test]
fn test_seed_slot_is_taken_and_neighbour_is_free() {
    let ledger = AppointmentLedger::seeded();
    let seed_day = TestDates::seed_day();

    assert!(!is_available(ledger.as_slice(), "d1", seed_day, slot("10:00")));
    assert!(is_available(ledger.as_slice(), "d1", seed_day, slot("10:30")));
    assert!(is_available(ledger.as_slice(), "d2", seed_day, slot("10:00")));
}

#[test]
fn test_availability_matches_ledger_for_every_slot() {
    let ledger = AppointmentLedger::seeded();
    let days = [TestDates::seed_day(), TestDates::ymd(2025, 11, 16)];

    for doctor_id in ["d1", "d2"] {
        for date in days {
            for time in TimeSlot::all() {
                let held = ledger.as_slice().iter().any(|a| a.occupies(doctor_id, date, time));
                assert_eq!(is_available(ledger.as_slice(), doctor_id, date, time), !held);
            }
        }
    }
}

#[test]
fn test_blocked_slot_becomes_unavailable() {
    let mut ledger = AppointmentLedger::seeded();
    let doctor = TestUser::doctor("d5", "Dr. João Alves").to_user();
    let date = TestDates::ymd(2025, 12, 1);

    ledger.append(new_block("b1".to_string(), &doctor, date, slot("09:00")));

    assert_eq!(ledger.len(), 2);
    assert!(!is_available(ledger.as_slice(), "d5", date, slot("09:00")));

    let grid = day_availability(ledger.as_slice(), "d5", date, TestDates::ymd(2025, 11, 1));
    assert_eq!(grid.free_slots().count(), 15);

    let schedule = doctor_schedule(ledger.as_slice(), "d5", date, date);
    assert_eq!(schedule.row(slot("09:00")).unwrap().state, SlotState::Blocked);
    assert_eq!(schedule.summary.blocked_count, 1);
    assert_eq!(schedule.summary.today_count, 1);
}

#[test]
fn test_cancel_frees_the_slot_again() {
    let mut ledger = AppointmentLedger::seeded();
    let seed_day: NaiveDate = TestDates::seed_day();

    ledger.remove("1").unwrap();

    assert!(is_available(ledger.as_slice(), "d1", seed_day, slot("10:00")));
    let schedule = doctor_schedule(ledger.as_slice(), "d1", seed_day, seed_day);
    assert!(schedule.rows.iter().all(|row| row.state == SlotState::Free));
}
