use assert_matches::assert_matches;
use chrono::NaiveDate;

use appointment_cell::services::{is_available, AppointmentLedger};
use doctor_cell::services::DoctorDirectory;
use session_cell::{reduce, Env, IgnoreReason, Intent, Outcome, Page, PageKind, SessionState};
use shared_models::clinic::AppointmentStatus;
use shared_models::slot::TimeSlot;
use shared_utils::test_utils::{TestDates, TestUser};

fn env() -> Env {
    Env {
        today: TestDates::ymd(2025, 11, 1),
        fresh_id: "new-1".to_string(),
    }
}

fn slot(label: &str) -> TimeSlot {
    label.parse().unwrap()
}

fn step(state: SessionState, intent: Intent) -> (SessionState, Outcome) {
    let reduced = reduce(state, intent, &env());
    (reduced.state, reduced.outcome)
}

fn cardiology_pick() -> Intent {
    let (specialty, doctor) = DoctorDirectory::clinic_default()
        .resolve_selection("s1", "d1")
        .unwrap();
    Intent::SelectSpecialtyAndDoctor { specialty, doctor }
}

fn patient_on_specialty() -> SessionState {
    let (state, outcome) = step(
        SessionState::seeded(),
        Intent::Login(TestUser::patient("p7", "Ana Paciente").to_user()),
    );
    assert_eq!(outcome, Outcome::applied(PageKind::Specialty));
    state
}

fn patient_on_confirmation(date: NaiveDate, time: &str) -> SessionState {
    let (state, _) = step(patient_on_specialty(), cardiology_pick());
    let (state, outcome) = step(state, Intent::SelectDateTime { date, time: slot(time) });
    assert_eq!(outcome, Outcome::applied(PageKind::Confirmation));
    state
}

fn doctor_on_schedule(id: &str) -> SessionState {
    let (state, outcome) = step(
        SessionState::seeded(),
        Intent::Login(TestUser::doctor(id, "Dr. Carlos Santos").to_user()),
    );
    assert_eq!(outcome, Outcome::applied(PageKind::DoctorSchedule));
    state
}

#[test]
fn test_initial_state_is_login_with_seed() {
    let state = SessionState::seeded();

    assert_eq!(state.kind(), PageKind::Login);
    assert!(state.user().is_none());
    assert!(state.page.selections().is_empty());
    assert_eq!(state.appointments.len(), 1);
}

#[test]
fn test_login_routes_by_user_type() {
    assert_eq!(patient_on_specialty().kind(), PageKind::Specialty);
    assert_eq!(doctor_on_schedule("d1").kind(), PageKind::DoctorSchedule);
}

#[test]
fn test_full_patient_booking_flow() {
    let date = TestDates::ymd(2025, 11, 20);
    let state = patient_on_confirmation(date, "14:30");

    let (state, outcome) = step(state, Intent::ConfirmBooking);

    assert_eq!(outcome, Outcome::applied(PageKind::Specialty));
    assert_eq!(state.kind(), PageKind::Specialty);
    assert!(state.page.selections().is_empty());
    assert_eq!(state.user().unwrap().id, "p7");
    assert_eq!(state.appointments.len(), 2);

    let booked = state.appointments.find("new-1").unwrap();
    assert_eq!(booked.patient_id, "p7");
    assert_eq!(booked.patient_name, "Ana Paciente");
    assert_eq!(booked.doctor_id, "d1");
    assert_eq!(booked.doctor_name, "Dr. Carlos Santos");
    assert_eq!(booked.specialty, "Cardiologia");
    assert_eq!(booked.date, date);
    assert_eq!(booked.time, slot("14:30"));
    assert_eq!(booked.status, AppointmentStatus::Confirmed);
}

#[test]
fn test_second_confirm_is_ignored_after_page_reset() {
    let state = patient_on_confirmation(TestDates::ymd(2025, 11, 20), "08:00");

    let (state, _) = step(state, Intent::ConfirmBooking);
    let before = state.clone();
    let (state, outcome) = step(state, Intent::ConfirmBooking);

    assert_matches!(
        outcome,
        Outcome::Ignored {
            reason: IgnoreReason::NotOnThisPage {
                page: PageKind::Specialty
            },
            ..
        }
    );
    assert_eq!(state, before);
}

#[test]
fn test_back_from_time_clears_everything() {
    let (state, _) = step(patient_on_specialty(), cardiology_pick());
    assert_eq!(state.kind(), PageKind::Time);
    assert!(state.page.selections().doctor.is_some());

    let (state, outcome) = step(state, Intent::BackToSpecialty);

    assert_eq!(outcome, Outcome::applied(PageKind::Specialty));
    assert!(state.page.selections().is_empty());
}

#[test]
fn test_back_from_confirmation_keeps_specialty_and_doctor() {
    let state = patient_on_confirmation(TestDates::ymd(2025, 11, 20), "09:30");

    let (state, outcome) = step(state, Intent::BackToTime);

    assert_eq!(outcome, Outcome::applied(PageKind::Time));
    let selections = state.page.selections();
    assert_eq!(selections.specialty.unwrap().id, "s1");
    assert_eq!(selections.doctor.unwrap().id, "d1");
    assert_eq!(selections.date, None);
    assert_eq!(selections.time, None);
}

#[test]
fn test_logout_clears_user_and_selections_from_every_page() {
    let states = vec![
        SessionState::seeded(),
        patient_on_specialty(),
        step(patient_on_specialty(), cardiology_pick()).0,
        patient_on_confirmation(TestDates::ymd(2025, 11, 20), "11:00"),
        doctor_on_schedule("d1"),
    ];

    for state in states {
        let appointments = state.appointments.clone();
        let (state, outcome) = step(state, Intent::Logout);

        assert_eq!(outcome, Outcome::applied(PageKind::Login));
        assert_eq!(state.page, Page::Login);
        assert!(state.user().is_none());
        assert!(state.page.selections().is_empty());
        assert_eq!(state.appointments, appointments);
    }
}

#[test]
fn test_taken_slot_cannot_be_selected() {
    let (state, _) = step(patient_on_specialty(), cardiology_pick());

    let (state, outcome) = step(
        state,
        Intent::SelectDateTime {
            date: TestDates::seed_day(),
            time: slot("10:00"),
        },
    );

    assert_matches!(outcome, Outcome::Ignored { reason: IgnoreReason::SlotTaken, .. });
    assert_eq!(state.kind(), PageKind::Time);
}

#[test]
fn test_past_date_cannot_be_selected() {
    let (state, _) = step(patient_on_specialty(), cardiology_pick());

    let (state, outcome) = step(
        state,
        Intent::SelectDateTime {
            date: TestDates::ymd(2025, 10, 31),
            time: slot("10:00"),
        },
    );

    assert_matches!(outcome, Outcome::Ignored { reason: IgnoreReason::PastDate, .. });
    assert_eq!(state.kind(), PageKind::Time);
}

#[test]
fn test_today_is_still_selectable() {
    let (state, _) = step(patient_on_specialty(), cardiology_pick());

    let (_, outcome) = step(
        state,
        Intent::SelectDateTime {
            date: env().today,
            time: slot("17:30"),
        },
    );

    assert!(outcome.is_applied());
}

#[test]
fn test_doctor_must_belong_to_specialty() {
    let directory = DoctorDirectory::clinic_default();
    let specialty = directory.specialty("s1").unwrap().clone();
    let doctor = directory.doctor("d3").unwrap().clone();

    let (state, outcome) = step(
        patient_on_specialty(),
        Intent::SelectSpecialtyAndDoctor { specialty, doctor },
    );

    assert_matches!(
        outcome,
        Outcome::Ignored {
            reason: IgnoreReason::DoctorNotInSpecialty,
            ..
        }
    );
    assert_eq!(state.kind(), PageKind::Specialty);
}

#[test]
fn test_confirm_rechecks_the_slot() {
    let date = TestDates::ymd(2025, 11, 20);
    let mut state = patient_on_confirmation(date, "15:00");
    let mut clash = state.appointments.find("1").unwrap().clone();
    clash.id = "other".to_string();
    clash.date = date;
    clash.time = slot("15:00");
    state.appointments.append(clash);

    let (state, outcome) = step(state, Intent::ConfirmBooking);

    assert_matches!(outcome, Outcome::Ignored { reason: IgnoreReason::SlotTaken, .. });
    assert_eq!(state.kind(), PageKind::Confirmation);
    assert_eq!(state.appointments.len(), 2);
}

#[test]
fn test_doctor_blocks_a_slot() {
    let date = TestDates::ymd(2025, 12, 1);
    let (state, outcome) = step(
        doctor_on_schedule("d1"),
        Intent::BlockSlot {
            date,
            time: slot("09:00"),
        },
    );

    assert_eq!(outcome, Outcome::applied(PageKind::DoctorSchedule));
    assert_eq!(state.appointments.len(), 2);

    let blocked = state.appointments.find("new-1").unwrap();
    assert_eq!(blocked.status, AppointmentStatus::Blocked);
    assert_eq!(blocked.patient_name, "Bloqueado");
    assert_eq!(blocked.patient_id, "");
    assert_eq!(blocked.doctor_id, "d1");
    assert!(!is_available(state.appointments.as_slice(), "d1", date, slot("09:00")));
}

#[test]
fn test_blocking_a_taken_slot_is_ignored() {
    let (state, outcome) = step(
        doctor_on_schedule("d1"),
        Intent::BlockSlot {
            date: TestDates::seed_day(),
            time: slot("10:00"),
        },
    );

    assert_matches!(outcome, Outcome::Ignored { reason: IgnoreReason::SlotTaken, .. });
    assert_eq!(state.appointments, AppointmentLedger::seeded());
}

#[test]
fn test_patient_cannot_block() {
    let (state, outcome) = step(
        patient_on_specialty(),
        Intent::BlockSlot {
            date: TestDates::ymd(2025, 12, 1),
            time: slot("09:00"),
        },
    );

    assert!(!outcome.is_applied());
    assert_eq!(state.appointments.len(), 1);
}

#[test]
fn test_cancel_removes_by_id() {
    let (state, outcome) = step(
        doctor_on_schedule("d1"),
        Intent::CancelAppointment {
            appointment_id: "1".to_string(),
        },
    );

    assert!(outcome.is_applied());
    assert!(state.appointments.is_empty());
}

#[test]
fn test_cancel_unknown_id_leaves_list_unchanged() {
    let (state, outcome) = step(
        doctor_on_schedule("d1"),
        Intent::CancelAppointment {
            appointment_id: "missing".to_string(),
        },
    );

    assert_matches!(
        outcome,
        Outcome::Ignored {
            reason: IgnoreReason::UnknownAppointment,
            ..
        }
    );
    assert_eq!(state.appointments, AppointmentLedger::seeded());
}

#[test]
fn test_intents_off_page_are_ignored() {
    let state = SessionState::seeded();

    for intent in [
        Intent::ConfirmBooking,
        Intent::BackToSpecialty,
        Intent::BackToTime,
        cardiology_pick(),
    ] {
        let (next, outcome) = step(state.clone(), intent);
        assert_matches!(
            outcome,
            Outcome::Ignored {
                reason: IgnoreReason::NotOnThisPage { page: PageKind::Login },
                ..
            }
        );
        assert_eq!(next, state);
    }
}

#[test]
fn test_second_login_is_ignored() {
    let state = patient_on_specialty();

    let (next, outcome) = step(
        state.clone(),
        Intent::Login(TestUser::doctor("d1", "Dr. Carlos Santos").to_user()),
    );

    assert!(!outcome.is_applied());
    assert_eq!(next, state);
}
