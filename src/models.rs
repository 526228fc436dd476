use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::services::{AppointmentService, DoctorService, PatientService};

#[derive(Clone)]
pub struct AppState {
    pub appointments: Arc<AppointmentService>,
    pub doctors: Arc<DoctorService>,
    pub patients: Arc<PatientService>,
    /// Serializes the read-then-write sequence of appointment mutations.
    /// The engine itself is synchronous and holds no lock; concurrent
    /// callers must be excluded here to keep the no-overlap invariant.
    pub booking_lock: Arc<tokio::sync::Mutex<()>>,
}

/* -------------------------
   Domain entities
--------------------------*/

/// Keyed record stored in a repository.
pub trait Entity: Clone {
    type Key: Ord + Clone;

    fn key(&self) -> Option<Self::Key>;

    /// Hook for store-assigned identities; only appointments use it.
    fn assign_key(&mut self, _next: i32) {}

    fn matches_search(&self, _field: &str, _text: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// 0 until the store assigns an id on creation.
    pub appointment_id: i32,
    pub appointment_date_time: Option<DateTime<Utc>>,
    pub duration_in_min: i32,
    pub description: Option<String>,
    pub doctor_email_address: Option<String>,
    pub patient_cpr: Option<String>,
}

impl Appointment {
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.appointment_date_time
            .map(|start| start + Duration::minutes(self.duration_in_min as i64))
    }
}

impl Entity for Appointment {
    type Key = i32;

    fn key(&self) -> Option<i32> {
        Some(self.appointment_id)
    }

    fn assign_key(&mut self, next: i32) {
        if self.appointment_id == 0 {
            self.appointment_id = next;
        }
    }

    fn matches_search(&self, field: &str, text: &str) -> bool {
        let value = match field {
            "description" => self.description.as_deref(),
            "doctor_email_address" => self.doctor_email_address.as_deref(),
            "patient_cpr" => self.patient_cpr.as_deref(),
            _ => None,
        };
        contains_ignore_case(value, text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Business key; doubles as the repository key.
    pub doctor_email_address: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl Entity for Doctor {
    type Key = String;

    fn key(&self) -> Option<String> {
        self.doctor_email_address.clone()
    }

    fn matches_search(&self, field: &str, text: &str) -> bool {
        let value = match field {
            "first_name" => self.first_name.as_deref(),
            "last_name" => self.last_name.as_deref(),
            "doctor_email_address" => self.doctor_email_address.as_deref(),
            _ => None,
        };
        contains_ignore_case(value, text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// National id, `DDMMYY-NNNN`; doubles as the repository key.
    pub patient_cpr: Option<String>,
    pub patient_first_name: Option<String>,
    pub patient_last_name: Option<String>,
    pub patient_phone: Option<String>,
    pub patient_email: Option<String>,
}

impl Entity for Patient {
    type Key = String;

    fn key(&self) -> Option<String> {
        self.patient_cpr.clone()
    }

    fn matches_search(&self, field: &str, text: &str) -> bool {
        let value = match field {
            "patient_first_name" => self.patient_first_name.as_deref(),
            "patient_last_name" => self.patient_last_name.as_deref(),
            "patient_email" => self.patient_email.as_deref(),
            _ => None,
        };
        contains_ignore_case(value, text)
    }
}

fn contains_ignore_case(value: Option<&str>, text: &str) -> bool {
    value
        .map(|v| v.to_lowercase().contains(&text.to_lowercase()))
        .unwrap_or(false)
}

/* -------------------------
   Pagination
--------------------------*/

/// Page window plus optional search, consumed by repositories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub current_page: i32,
    #[serde(default)]
    pub items_per_page: i32,
    #[serde(default)]
    pub search_field: Option<String>,
    #[serde(default)]
    pub search_text: Option<String>,
}

/// One page of results plus the count across all pages. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredList<T> {
    pub list: Vec<T>,
    pub total_count: i32,
    pub filter_used: Filter,
}
