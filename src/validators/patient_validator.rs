use crate::error::DomainError;
use crate::models::Patient;
use crate::validators::{is_valid_cpr, is_valid_email, is_valid_phone};

/// Per-field patient checks plus the aggregate pass: first name, last name,
/// phone, email, CPR.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatientValidator;

impl PatientValidator {
    pub fn default_validator(&self, patient: Option<&Patient>) -> Result<(), DomainError> {
        let patient = patient.ok_or_else(|| DomainError::null_input("Patient cannot be null!"))?;
        self.validate_first_name(patient)?;
        self.validate_last_name(patient)?;
        self.validate_phone(patient)?;
        self.validate_email(patient)?;
        self.validate_patient_cpr(patient)?;
        Ok(())
    }

    pub fn validate_first_name(&self, patient: &Patient) -> Result<(), DomainError> {
        require_text(patient.patient_first_name.as_deref(), "Patient Firstname cannot be null or empty!")?;
        Ok(())
    }

    pub fn validate_last_name(&self, patient: &Patient) -> Result<(), DomainError> {
        require_text(patient.patient_last_name.as_deref(), "Patient Lastname cannot be null or empty!")?;
        Ok(())
    }

    pub fn validate_phone(&self, patient: &Patient) -> Result<(), DomainError> {
        let phone = require_text(
            patient.patient_phone.as_deref(),
            "Patient phone number cannot be null or empty!",
        )?;
        if !is_valid_phone(phone) {
            return Err(DomainError::invalid_argument(
                "Patient Phone number has to be a valid Phone number",
            ));
        }
        Ok(())
    }

    pub fn validate_email(&self, patient: &Patient) -> Result<(), DomainError> {
        let email = require_text(
            patient.patient_email.as_deref(),
            "Patient e-mail cannot be null or empty!",
        )?;
        if !is_valid_email(email) {
            return Err(DomainError::invalid_argument("Patient Email has to be a valid Email"));
        }
        Ok(())
    }

    pub fn validate_patient_cpr(&self, patient: &Patient) -> Result<(), DomainError> {
        let cpr = require_text(
            patient.patient_cpr.as_deref(),
            "Patient CPR cannot be null or empty!",
        )?;
        self.validate_cpr(cpr)
    }

    /// Key check for lookups and removals, where only the CPR string is at
    /// hand.
    pub fn validate_cpr(&self, cpr: &str) -> Result<(), DomainError> {
        if !is_valid_cpr(cpr) {
            return Err(DomainError::invalid_argument(
                "Patient CPR has to be a valid CPR number",
            ));
        }
        Ok(())
    }
}

fn require_text<'a>(value: Option<&'a str>, msg: &str) -> Result<&'a str, DomainError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(DomainError::null_input(msg)),
    }
}
