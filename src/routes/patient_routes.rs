// src/routes/patient_routes.rs

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{AppState, Filter, FilteredList, Patient},
    routes::ApiOk,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/{cpr}",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
}

#[derive(Debug, Deserialize)]
pub struct PatientRequest {
    pub patient_cpr: Option<String>,
    pub patient_first_name: Option<String>,
    pub patient_last_name: Option<String>,
    pub patient_phone: Option<String>,
    pub patient_email: Option<String>,
}

impl PatientRequest {
    fn into_patient(self, cpr: Option<String>) -> Patient {
        Patient {
            // the path key wins over whatever the body carries
            patient_cpr: cpr.or(self.patient_cpr),
            patient_first_name: self.patient_first_name,
            patient_last_name: self.patient_last_name,
            patient_phone: self.patient_phone,
            patient_email: self.patient_email,
        }
    }
}

pub async fn list_patients(
    State(state): State<AppState>,
    Query(filter): Query<Filter>,
) -> Result<Json<ApiOk<FilteredList<Patient>>>, ApiError> {
    let result = state.patients.get_all(&filter)?;
    Ok(Json(ApiOk { data: result }))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(cpr): Path<String>,
) -> Result<Json<ApiOk<Patient>>, ApiError> {
    let patient = state.patients.get_by_id(&cpr)?;
    Ok(Json(ApiOk { data: patient }))
}

pub async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<PatientRequest>,
) -> Result<Json<ApiOk<Patient>>, ApiError> {
    let stored = state.patients.add(req.into_patient(None))?;
    Ok(Json(ApiOk { data: stored }))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(cpr): Path<String>,
    Json(req): Json<PatientRequest>,
) -> Result<Json<ApiOk<Patient>>, ApiError> {
    let stored = state.patients.edit(req.into_patient(Some(cpr)))?;
    Ok(Json(ApiOk { data: stored }))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(cpr): Path<String>,
) -> Result<Json<ApiOk<Patient>>, ApiError> {
    let removed = state.patients.remove(&cpr)?;
    Ok(Json(ApiOk { data: removed }))
}
