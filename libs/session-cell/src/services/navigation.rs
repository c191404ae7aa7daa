use chrono::NaiveDate;
use tracing::debug;

use appointment_cell::models::AppointmentError;
use appointment_cell::services::{ensure_bookable, ensure_free, new_block, new_booking};

use shared_models::auth::User;
use shared_models::clinic::{Doctor, Specialty};
use shared_models::slot::TimeSlot;

use crate::models::{IgnoreReason, Intent, Outcome, Page, PageKind, SessionState};

/// What a transition may need from outside the state.
#[derive(Debug, Clone)]
pub struct Env {
    /// The clinic's current calendar day.
    pub today: NaiveDate,
    /// Id for the appointment the transition creates, if any.
    pub fresh_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduced {
    pub state: SessionState,
    pub outcome: Outcome,
}

impl Reduced {
    fn applied(state: SessionState) -> Self {
        let outcome = Outcome::applied(state.kind());
        Self { state, outcome }
    }

    fn ignored(state: SessionState, reason: IgnoreReason) -> Self {
        Self {
            state,
            outcome: Outcome::ignored(reason),
        }
    }
}

/// Applies one intent. Intents the current page does not offer, or whose
/// guard fails, return the state untouched with an `Ignored` outcome.
pub fn reduce(state: SessionState, intent: Intent, env: &Env) -> Reduced {
    let intent_name = intent.name();
    let from = state.kind();

    let reduced = match intent {
        Intent::Logout => Reduced::applied(SessionState {
            page: Page::Login,
            ..state
        }),
        Intent::Login(user) => login(state, user),
        Intent::SelectSpecialtyAndDoctor { specialty, doctor } => {
            select_specialty_and_doctor(state, specialty, doctor)
        }
        Intent::SelectDateTime { date, time } => select_date_time(state, date, time, env),
        Intent::ConfirmBooking => confirm_booking(state, env),
        Intent::BackToSpecialty => back_to_specialty(state),
        Intent::BackToTime => back_to_time(state),
        Intent::BlockSlot { date, time } => block_slot(state, date, time, env),
        Intent::CancelAppointment { appointment_id } => cancel_appointment(state, &appointment_id),
    };

    debug!("{} on {}: {:?}", intent_name, from, reduced.outcome);
    reduced
}

fn not_here(state: SessionState) -> Reduced {
    let page = state.kind();
    Reduced::ignored(state, IgnoreReason::NotOnThisPage { page })
}

fn login(state: SessionState, user: User) -> Reduced {
    if state.page != Page::Login {
        return not_here(state);
    }

    let page = if user.is_doctor() {
        Page::DoctorSchedule { user }
    } else {
        Page::Specialty { user }
    };

    Reduced::applied(SessionState { page, ..state })
}

fn select_specialty_and_doctor(
    state: SessionState,
    specialty: Specialty,
    doctor: Doctor,
) -> Reduced {
    let SessionState { page, appointments } = state;

    match page {
        Page::Specialty { user } => {
            if doctor.specialty_id != specialty.id || specialty.doctor(&doctor.id).is_none() {
                let state = SessionState {
                    page: Page::Specialty { user },
                    appointments,
                };
                return Reduced::ignored(state, IgnoreReason::DoctorNotInSpecialty);
            }

            Reduced::applied(SessionState {
                page: Page::Time {
                    user,
                    specialty,
                    doctor,
                },
                appointments,
            })
        }
        page => not_here(SessionState { page, appointments }),
    }
}

fn select_date_time(state: SessionState, date: NaiveDate, time: TimeSlot, env: &Env) -> Reduced {
    let SessionState { page, appointments } = state;

    match page {
        Page::Time {
            user,
            specialty,
            doctor,
        } => match ensure_bookable(appointments.as_slice(), &doctor.id, date, time, env.today) {
            Ok(()) => Reduced::applied(SessionState {
                page: Page::Confirmation {
                    user,
                    specialty,
                    doctor,
                    date,
                    time,
                },
                appointments,
            }),
            Err(err) => {
                let page = Page::Time {
                    user,
                    specialty,
                    doctor,
                };
                Reduced::ignored(SessionState { page, appointments }, ignore_reason(&err))
            }
        },
        page => not_here(SessionState { page, appointments }),
    }
}

fn confirm_booking(state: SessionState, env: &Env) -> Reduced {
    let SessionState {
        page,
        mut appointments,
    } = state;

    match page {
        Page::Confirmation {
            user,
            specialty,
            doctor,
            date,
            time,
        } => {
            // the slot may have been taken since it was picked
            if let Err(err) = ensure_free(appointments.as_slice(), &doctor.id, date, time) {
                let page = Page::Confirmation {
                    user,
                    specialty,
                    doctor,
                    date,
                    time,
                };
                return Reduced::ignored(SessionState { page, appointments }, ignore_reason(&err));
            }

            appointments.append(new_booking(
                env.fresh_id.clone(),
                &user,
                &specialty,
                &doctor,
                date,
                time,
            ));

            Reduced::applied(SessionState {
                page: Page::Specialty { user },
                appointments,
            })
        }
        page => not_here(SessionState { page, appointments }),
    }
}

fn back_to_specialty(state: SessionState) -> Reduced {
    let SessionState { page, appointments } = state;

    match page {
        Page::Time { user, .. } => Reduced::applied(SessionState {
            page: Page::Specialty { user },
            appointments,
        }),
        page => not_here(SessionState { page, appointments }),
    }
}

fn back_to_time(state: SessionState) -> Reduced {
    let SessionState { page, appointments } = state;

    match page {
        Page::Confirmation {
            user,
            specialty,
            doctor,
            ..
        } => Reduced::applied(SessionState {
            page: Page::Time {
                user,
                specialty,
                doctor,
            },
            appointments,
        }),
        page => not_here(SessionState { page, appointments }),
    }
}

fn block_slot(state: SessionState, date: NaiveDate, time: TimeSlot, env: &Env) -> Reduced {
    let user = match &state.page {
        Page::DoctorSchedule { user } => user.clone(),
        _ => return not_here(state),
    };

    if !user.is_doctor() {
        return Reduced::ignored(state, IgnoreReason::NotADoctor);
    }

    if let Err(err) = ensure_free(state.appointments.as_slice(), &user.id, date, time) {
        return Reduced::ignored(state, ignore_reason(&err));
    }

    let mut state = state;
    state
        .appointments
        .append(new_block(env.fresh_id.clone(), &user, date, time));

    Reduced::applied(state)
}

fn cancel_appointment(state: SessionState, appointment_id: &str) -> Reduced {
    if state.kind() != PageKind::DoctorSchedule {
        return not_here(state);
    }

    let mut state = state;
    match state.appointments.remove(appointment_id) {
        Ok(_) => Reduced::applied(state),
        Err(err) => Reduced::ignored(state, ignore_reason(&err)),
    }
}

fn ignore_reason(err: &AppointmentError) -> IgnoreReason {
    match err {
        AppointmentError::NotFound(_) => IgnoreReason::UnknownAppointment,
        AppointmentError::SlotNotAvailable { .. } => IgnoreReason::SlotTaken,
        AppointmentError::PastDate(_) => IgnoreReason::PastDate,
    }
}
