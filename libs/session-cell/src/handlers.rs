use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use appointment_cell::services::{day_availability, find_double_bookings};
use auth_cell::{LoginForm, RegisterForm};
use shared_models::error::AppError;
use shared_utils::dates::{deserialize_calendar_date, deserialize_optional_calendar_date};

use crate::models::{
    DoctorSelectionRequest, Intent, IntentRequest, Outcome, SessionSnapshot, SessionState,
    SlotRequest,
};
use crate::router::SessionAppState;
use crate::services::views::{page_view, PageView};

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    #[serde(default, deserialize_with = "deserialize_optional_calendar_date")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub doctor_id: String,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct IntentResponse {
    pub outcome: Outcome,
    pub session: SessionSnapshot,
}

// ==============================================================================
// SESSION LIFECYCLE
// ==============================================================================

#[axum::debug_handler]
pub async fn create_session(
    State(state): State<Arc<SessionAppState>>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let (session_id, session) = state.store.create().await;

    (StatusCode::CREATED, Json(session.snapshot(session_id)))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.store.get(session_id).await?;

    Ok(Json(session.snapshot(session_id)))
}

#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.remove(session_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ==============================================================================
// READ MODELS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_view(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<PageView>, AppError> {
    let session = state.store.get(session_id).await?;
    let view = page_view(&session, &state.directory, state.store.today(), query.date);

    Ok(Json(view))
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let session = state.store.get(session_id).await?;
    let doctor = state.directory.doctor(&query.doctor_id)?;

    let grid = day_availability(
        session.appointments.as_slice(),
        &doctor.id,
        query.date,
        state.store.today(),
    );

    Ok(Json(json!(grid)))
}

#[axum::debug_handler]
pub async fn get_consistency(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.store.get(session_id).await?;
    let double_bookings = find_double_bookings(session.appointments.as_slice());

    Ok(Json(json!({
        "consistent": double_bookings.is_empty(),
        "doubleBookings": double_bookings,
        "appointmentCount": session.appointments.len()
    })))
}

// ==============================================================================
// INTENTS
// ==============================================================================

async fn dispatch(
    state: &SessionAppState,
    session_id: Uuid,
    intent: Intent,
) -> Result<Json<IntentResponse>, AppError> {
    let (outcome, session): (Outcome, SessionState) =
        state.store.dispatch(session_id, intent).await?;

    Ok(Json(IntentResponse {
        outcome,
        session: session.snapshot(session_id),
    }))
}

/// Turns the wire form into a reducer intent, resolving ids and forms.
fn resolve_intent(state: &SessionAppState, request: IntentRequest) -> Result<Intent, AppError> {
    let intent = match request {
        IntentRequest::Login(form) => Intent::Login(state.auth.login(form)?),
        IntentRequest::Register(form) => Intent::Login(state.auth.register(form)?),
        IntentRequest::Logout => Intent::Logout,
        IntentRequest::SelectSpecialtyAndDoctor(selection) => {
            let (specialty, doctor) = state
                .directory
                .resolve_selection(&selection.specialty_id, &selection.doctor_id)?;
            Intent::SelectSpecialtyAndDoctor { specialty, doctor }
        }
        IntentRequest::SelectDateTime(SlotRequest { date, time }) => {
            Intent::SelectDateTime { date, time }
        }
        IntentRequest::ConfirmBooking => Intent::ConfirmBooking,
        IntentRequest::BackToSpecialty => Intent::BackToSpecialty,
        IntentRequest::BackToTime => Intent::BackToTime,
        IntentRequest::BlockSlot(SlotRequest { date, time }) => Intent::BlockSlot { date, time },
        IntentRequest::CancelAppointment { appointment_id } => {
            Intent::CancelAppointment { appointment_id }
        }
    };

    debug!("Resolved intent {}", intent.name());
    Ok(intent)
}

#[axum::debug_handler]
pub async fn post_intent(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<IntentRequest>,
) -> Result<Json<IntentResponse>, AppError> {
    let intent = resolve_intent(&state, request)?;
    dispatch(&state, session_id, intent).await
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
    Json(form): Json<LoginForm>,
) -> Result<Json<IntentResponse>, AppError> {
    let intent = resolve_intent(&state, IntentRequest::Login(form))?;
    dispatch(&state, session_id, intent).await
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
    Json(form): Json<RegisterForm>,
) -> Result<Json<IntentResponse>, AppError> {
    let intent = resolve_intent(&state, IntentRequest::Register(form))?;
    dispatch(&state, session_id, intent).await
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<IntentResponse>, AppError> {
    dispatch(&state, session_id, Intent::Logout).await
}

#[axum::debug_handler]
pub async fn select_doctor(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
    Json(selection): Json<DoctorSelectionRequest>,
) -> Result<Json<IntentResponse>, AppError> {
    let intent = resolve_intent(&state, IntentRequest::SelectSpecialtyAndDoctor(selection))?;
    dispatch(&state, session_id, intent).await
}

#[axum::debug_handler]
pub async fn select_slot(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
    Json(slot): Json<SlotRequest>,
) -> Result<Json<IntentResponse>, AppError> {
    let intent = Intent::SelectDateTime {
        date: slot.date,
        time: slot.time,
    };
    dispatch(&state, session_id, intent).await
}

#[axum::debug_handler]
pub async fn confirm_booking(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<IntentResponse>, AppError> {
    dispatch(&state, session_id, Intent::ConfirmBooking).await
}

#[axum::debug_handler]
pub async fn back_to_specialty(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<IntentResponse>, AppError> {
    dispatch(&state, session_id, Intent::BackToSpecialty).await
}

#[axum::debug_handler]
pub async fn back_to_time(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<IntentResponse>, AppError> {
    dispatch(&state, session_id, Intent::BackToTime).await
}

#[axum::debug_handler]
pub async fn block_slot(
    State(state): State<Arc<SessionAppState>>,
    Path(session_id): Path<Uuid>,
    Json(slot): Json<SlotRequest>,
) -> Result<Json<IntentResponse>, AppError> {
    let intent = Intent::BlockSlot {
        date: slot.date,
        time: slot.time,
    };
    dispatch(&state, session_id, intent).await
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<SessionAppState>>,
    Path((session_id, appointment_id)): Path<(Uuid, String)>,
) -> Result<Json<IntentResponse>, AppError> {
    dispatch(&state, session_id, Intent::CancelAppointment { appointment_id }).await
}
