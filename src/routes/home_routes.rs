use axum::{Json, Router, extract::State, routing::get};

use crate::models::AppState;

#[derive(serde::Serialize)]
pub struct HomeResponse {
    pub data: HomeData,
}

#[derive(serde::Serialize)]
pub struct HomeData {
    pub service: String,
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/home", get(home))
}

pub async fn home(State(_state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        data: HomeData {
            service: "medical appointment booking".to_string(),
            message: "see /api/v1/appointments, /api/v1/doctors, /api/v1/patients".to_string(),
        },
    })
}
