use std::sync::Arc;

use crate::error::DomainError;
use crate::models::{Doctor, Filter, FilteredList};
use crate::repository::Repository;
use crate::validators::DoctorValidator;

/// CRUD over doctors. Same shape as the appointment service minus the
/// temporal logic; uniqueness of the email key is repository-enforced.
pub struct DoctorService {
    doctors: Arc<dyn Repository<Doctor>>,
    validator: DoctorValidator,
}

impl DoctorService {
    pub fn new(doctors: Arc<dyn Repository<Doctor>>, validator: DoctorValidator) -> Self {
        Self { doctors, validator }
    }

    pub fn get_all(&self, filter: &Filter) -> Result<FilteredList<Doctor>, DomainError> {
        if filter.current_page < 0 || filter.items_per_page < 0 {
            return Err(DomainError::InvalidRequest(
                "current page and items per page can't be negative".to_string(),
            ));
        }
        if filter.current_page * filter.items_per_page >= self.doctors.count() {
            return Err(DomainError::not_found("no more doctors"));
        }

        let result = self.doctors.get_all(filter);
        if result.list.is_empty() {
            return Err(DomainError::not_found(
                "Could not find doctors that satisfy the filter",
            ));
        }
        Ok(result)
    }

    pub fn get_by_id(&self, email: &str) -> Result<Doctor, DomainError> {
        self.validator.validate_email(email)?;
        self.doctors
            .get_by_id(&email.to_string())
            .ok_or_else(|| DomainError::not_found("Doctor does not exist"))
    }

    pub fn add(&self, doctor: Doctor) -> Result<Doctor, DomainError> {
        self.validator.default_validator(Some(&doctor))?;
        let stored = self.doctors.add(doctor)?;
        tracing::info!(
            email = stored.doctor_email_address.as_deref().unwrap_or(""),
            "doctor registered"
        );
        Ok(stored)
    }

    pub fn edit(&self, doctor: Doctor) -> Result<Doctor, DomainError> {
        self.validator.default_validator(Some(&doctor))?;
        let email = doctor.doctor_email_address.clone().unwrap_or_default();
        if self.doctors.get_by_id(&email).is_none() {
            return Err(DomainError::not_found("A doctor with this email does not exist"));
        }
        self.doctors.edit(doctor)
    }

    pub fn remove(&self, email: &str) -> Result<Doctor, DomainError> {
        self.validator.validate_email(email)?;
        if self.doctors.get_by_id(&email.to_string()).is_none() {
            return Err(DomainError::not_found("This doctor does not exist"));
        }
        let removed = self
            .doctors
            .remove(&email.to_string())
            .ok_or_else(|| DomainError::not_found("This doctor does not exist"))?;
        tracing::info!(email, "doctor removed");
        Ok(removed)
    }
}
