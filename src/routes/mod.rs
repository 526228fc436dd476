use crate::models::AppState;
use axum::Router;
use serde::Serialize;

pub mod appointment_routes;
pub mod doctor_routes;
pub mod home_routes;
pub mod patient_routes;

#[derive(Debug, Serialize)]
pub struct ApiOk<T> {
    pub data: T,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", appointment_routes::router())
        .nest("/api/v1", doctor_routes::router())
        .nest("/api/v1", patient_routes::router())
        .merge(home_routes::router())
        .with_state(state)
}
