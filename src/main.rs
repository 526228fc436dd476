mod config;
mod error;
mod models;
mod repository;
mod routes;
mod services;
mod validators;

use std::sync::Arc;

use crate::{
    config::Config,
    models::{AppState, Appointment, Doctor, Patient},
    repository::{InMemoryRepository, Repository},
    services::{AppointmentService, DoctorService, PatientService},
    validators::{AppointmentValidator, DoctorValidator, PatientValidator},
};

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use axum::http::header;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cfg = Config::from_env()?;

    let appointment_repo: Arc<dyn Repository<Appointment>> =
        Arc::new(InMemoryRepository::<Appointment>::new());
    let doctor_repo: Arc<dyn Repository<Doctor>> = Arc::new(InMemoryRepository::<Doctor>::new());
    let patient_repo: Arc<dyn Repository<Patient>> = Arc::new(InMemoryRepository::<Patient>::new());

    let state = AppState {
        appointments: Arc::new(AppointmentService::new(
            appointment_repo,
            doctor_repo.clone(),
            patient_repo.clone(),
            AppointmentValidator,
        )),
        doctors: Arc::new(DoctorService::new(doctor_repo, DoctorValidator)),
        patients: Arc::new(PatientService::new(patient_repo, PatientValidator)),
        booking_lock: Arc::new(tokio::sync::Mutex::new(())),
    };

    if cfg.seed_demo_data {
        seed_demo_data(&state)?;
    }

    // DEV ONLY: allow browser/WebView clients to call the API.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on http://{}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// A couple of doctors and patients so the API is usable out of the box.
fn seed_demo_data(state: &AppState) -> anyhow::Result<()> {
    for (first_name, last_name, email, phone, is_admin) in [
        ("Karl", "Mason", "Karl@gmail.com", "23115177", true),
        ("Charlie", "Holt", "Charlie@gmail.uk", "12345678", false),
    ] {
        state.doctors.add(Doctor {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            doctor_email_address: Some(email.to_string()),
            phone_number: Some(phone.to_string()),
            is_admin,
        })?;
    }

    for (cpr, first_name, last_name, phone, email) in [
        ("011200-4041", "mike", "mikeowsky", "40506090", "mike@hotmail.com"),
        ("110695-0004", "hans", "hansen", "40204050", "hans@hotmail.com"),
    ] {
        state.patients.add(Patient {
            patient_cpr: Some(cpr.to_string()),
            patient_first_name: Some(first_name.to_string()),
            patient_last_name: Some(last_name.to_string()),
            patient_phone: Some(phone.to_string()),
            patient_email: Some(email.to_string()),
        })?;
    }

    tracing::info!("seeded demo doctors and patients");
    Ok(())
}
