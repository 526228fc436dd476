pub mod appointment_service;
pub mod conflict;
pub mod doctor_service;
pub mod patient_service;

pub use appointment_service::AppointmentService;
pub use conflict::{ConflictDetection, IntervalScan};
pub use doctor_service::DoctorService;
pub use patient_service::PatientService;
