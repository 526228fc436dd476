// src/routes/appointment_routes.rs

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{AppState, Appointment, Filter, FilteredList},
    routes::ApiOk,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/appointments/{appointment_id}",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
}

/// All fields optional so that presence rules stay with the engine's
/// validator rather than the deserializer.
#[derive(Debug, Deserialize)]
pub struct AppointmentRequest {
    pub appointment_date_time: Option<DateTime<Utc>>,
    pub duration_in_min: Option<i32>,
    pub description: Option<String>,
    pub doctor_email_address: Option<String>,
    pub patient_cpr: Option<String>,
}

impl AppointmentRequest {
    fn into_appointment(self, appointment_id: i32) -> Appointment {
        Appointment {
            appointment_id,
            appointment_date_time: self.appointment_date_time,
            duration_in_min: self.duration_in_min.unwrap_or(0),
            description: self.description,
            doctor_email_address: self.doctor_email_address,
            patient_cpr: self.patient_cpr,
        }
    }
}

pub async fn list_appointments(
    State(state): State<AppState>,
    Query(filter): Query<Filter>,
) -> Result<Json<ApiOk<FilteredList<Appointment>>>, ApiError> {
    let result = state.appointments.get_all(&filter)?;
    Ok(Json(ApiOk { data: result }))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i32>,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    let appointment = state.appointments.get_by_id(appointment_id)?;
    Ok(Json(ApiOk { data: appointment }))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<AppointmentRequest>,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    // serialize booking decisions; the conflict scan and the write must not
    // interleave across requests
    let _booking = state.booking_lock.lock().await;
    let stored = state.appointments.add(req.into_appointment(0))?;
    Ok(Json(ApiOk { data: stored }))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i32>,
    Json(req): Json<AppointmentRequest>,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    let _booking = state.booking_lock.lock().await;
    let stored = state.appointments.edit(req.into_appointment(appointment_id))?;
    Ok(Json(ApiOk { data: stored }))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i32>,
) -> Result<Json<ApiOk<Appointment>>, ApiError> {
    let _booking = state.booking_lock.lock().await;
    let removed = state.appointments.remove(appointment_id)?;
    Ok(Json(ApiOk { data: removed }))
}
