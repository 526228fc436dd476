use crate::error::DomainError;
use crate::models::Doctor;
use crate::validators::{is_valid_email, is_valid_person_name, is_valid_phone};

/// Per-field doctor checks plus the aggregate pass the services run before
/// any write. Field order in the aggregate is fixed: first name, last name,
/// phone, email.
#[derive(Debug, Default, Clone, Copy)]
pub struct DoctorValidator;

impl DoctorValidator {
    pub fn default_validator(&self, doctor: Option<&Doctor>) -> Result<(), DomainError> {
        let doctor = doctor.ok_or_else(|| DomainError::null_input("Doctor cannot be null"))?;
        self.first_name_validation(doctor)?;
        self.last_name_validation(doctor)?;
        self.phone_validation(doctor)?;
        self.email_validation(doctor)?;
        Ok(())
    }

    pub fn first_name_validation(&self, doctor: &Doctor) -> Result<(), DomainError> {
        match doctor.first_name.as_deref() {
            Some(name) if is_valid_person_name(name) => Ok(()),
            _ => Err(DomainError::invalid_argument("a doctor needs a valid first name")),
        }
    }

    pub fn last_name_validation(&self, doctor: &Doctor) -> Result<(), DomainError> {
        match doctor.last_name.as_deref() {
            Some(name) if is_valid_person_name(name) => Ok(()),
            _ => Err(DomainError::invalid_argument("a doctor needs a valid last name")),
        }
    }

    pub fn phone_validation(&self, doctor: &Doctor) -> Result<(), DomainError> {
        let Some(phone) = doctor.phone_number.as_deref() else {
            return Err(DomainError::null_input("a doctor needs a phone number"));
        };
        if !is_valid_phone(phone) {
            return Err(DomainError::invalid_argument("a doctor needs a valid phone number"));
        }
        Ok(())
    }

    pub fn email_validation(&self, doctor: &Doctor) -> Result<(), DomainError> {
        let Some(email) = doctor.doctor_email_address.as_deref() else {
            return Err(DomainError::null_input("a doctor needs an email"));
        };
        if !is_valid_email(email) {
            return Err(DomainError::invalid_argument("a doctor needs a valid email address"));
        }
        Ok(())
    }

    /// Key check for lookups and removals, where only the email string is at
    /// hand.
    pub fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if !is_valid_email(email) {
            return Err(DomainError::invalid_argument("This is not a valid email address"));
        }
        Ok(())
    }
}
