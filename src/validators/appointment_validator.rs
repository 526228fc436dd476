use chrono::Utc;

use crate::error::DomainError;
use crate::models::Appointment;

const MAX_DESCRIPTION_CHARS: usize = 200;
const MAX_DURATION_MIN: i32 = 1440;

/// Field-level checks for appointments, composed into a create-mode and an
/// edit-mode pass. The two modes differ only in their id rule.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppointmentValidator;

impl AppointmentValidator {
    pub fn create_validation(&self, appointment: Option<&Appointment>) -> Result<(), DomainError> {
        let appointment = Self::require_present(appointment)?;
        self.create_id_validation(appointment)?;
        self.date_validation(appointment)?;
        self.duration_validation(appointment)?;
        self.description_validation(appointment)?;
        self.doctor_validation(appointment)?;
        Ok(())
    }

    pub fn edit_validation(&self, appointment: Option<&Appointment>) -> Result<(), DomainError> {
        let appointment = Self::require_present(appointment)?;
        self.edit_id_validation(appointment)?;
        self.date_validation(appointment)?;
        self.duration_validation(appointment)?;
        self.description_validation(appointment)?;
        self.doctor_validation(appointment)?;
        Ok(())
    }

    /// Key check used by lookups and removals. Accepts 0, unlike the
    /// edit-mode rule; both behaviors are part of the contract.
    pub fn id_validation(&self, id: i32) -> Result<(), DomainError> {
        if id < 0 {
            return Err(DomainError::invalid_argument("Id cannot be negative"));
        }
        Ok(())
    }

    pub fn create_id_validation(&self, appointment: &Appointment) -> Result<(), DomainError> {
        if appointment.appointment_id != 0 {
            return Err(DomainError::invalid_argument(
                "A new appointment should not have an id",
            ));
        }
        Ok(())
    }

    pub fn edit_id_validation(&self, appointment: &Appointment) -> Result<(), DomainError> {
        if appointment.appointment_id <= 0 {
            return Err(DomainError::invalid_argument(
                "When updating an appointment you need an id",
            ));
        }
        Ok(())
    }

    pub fn date_validation(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let Some(date) = appointment.appointment_date_time else {
            return Err(DomainError::invalid_argument("an appointment needs a dateTime"));
        };
        if date < Utc::now() {
            return Err(DomainError::invalid_argument(
                "The date is invalid, you cant set an appointment in the past",
            ));
        }
        Ok(())
    }

    pub fn duration_validation(&self, appointment: &Appointment) -> Result<(), DomainError> {
        if appointment.duration_in_min < 1 {
            return Err(DomainError::invalid_argument("an appointment needs a duration"));
        }
        if appointment.duration_in_min > MAX_DURATION_MIN {
            return Err(DomainError::invalid_argument(
                "The duration cannot be longer than one day",
            ));
        }
        Ok(())
    }

    pub fn description_validation(&self, appointment: &Appointment) -> Result<(), DomainError> {
        if let Some(description) = &appointment.description {
            if description.chars().count() > MAX_DESCRIPTION_CHARS {
                return Err(DomainError::invalid_argument("description is too long"));
            }
        }
        Ok(())
    }

    pub fn doctor_validation(&self, appointment: &Appointment) -> Result<(), DomainError> {
        match appointment.doctor_email_address.as_deref() {
            Some(email) if !email.is_empty() => Ok(()),
            _ => Err(DomainError::invalid_argument("Appointments needs a doctor")),
        }
    }

    fn require_present(appointment: Option<&Appointment>) -> Result<&Appointment, DomainError> {
        appointment.ok_or_else(|| DomainError::null_input("Appointment cannot be null"))
    }
}
