// src/routes/doctor_routes.rs

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{AppState, Doctor, Filter, FilteredList},
    routes::ApiOk,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route(
            "/doctors/{email}",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
}

#[derive(Debug, Deserialize)]
pub struct DoctorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub doctor_email_address: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl DoctorRequest {
    fn into_doctor(self, email: Option<String>) -> Doctor {
        Doctor {
            first_name: self.first_name,
            last_name: self.last_name,
            // the path key wins over whatever the body carries
            doctor_email_address: email.or(self.doctor_email_address),
            phone_number: self.phone_number,
            is_admin: self.is_admin,
        }
    }
}

pub async fn list_doctors(
    State(state): State<AppState>,
    Query(filter): Query<Filter>,
) -> Result<Json<ApiOk<FilteredList<Doctor>>>, ApiError> {
    let result = state.doctors.get_all(&filter)?;
    Ok(Json(ApiOk { data: result }))
}

pub async fn get_doctor(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiOk<Doctor>>, ApiError> {
    let doctor = state.doctors.get_by_id(&email)?;
    Ok(Json(ApiOk { data: doctor }))
}

pub async fn create_doctor(
    State(state): State<AppState>,
    Json(req): Json<DoctorRequest>,
) -> Result<Json<ApiOk<Doctor>>, ApiError> {
    let stored = state.doctors.add(req.into_doctor(None))?;
    Ok(Json(ApiOk { data: stored }))
}

pub async fn update_doctor(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(req): Json<DoctorRequest>,
) -> Result<Json<ApiOk<Doctor>>, ApiError> {
    let stored = state.doctors.edit(req.into_doctor(Some(email)))?;
    Ok(Json(ApiOk { data: stored }))
}

pub async fn delete_doctor(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiOk<Doctor>>, ApiError> {
    let removed = state.doctors.remove(&email)?;
    Ok(Json(ApiOk { data: removed }))
}
