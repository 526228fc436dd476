use std::sync::Arc;

use crate::error::DomainError;
use crate::models::{Appointment, Doctor, Filter, FilteredList, Patient};
use crate::repository::Repository;
use crate::services::conflict::{ConflictDetection, IntervalScan};
use crate::validators::AppointmentValidator;

/// Orchestrates appointment writes: field validation, referential checks
/// against the doctor/patient stores, double-booking detection, then the
/// repository call. Checks run as an ordered chain with early exit so the
/// order stays auditable.
pub struct AppointmentService {
    appointments: Arc<dyn Repository<Appointment>>,
    doctors: Arc<dyn Repository<Doctor>>,
    patients: Arc<dyn Repository<Patient>>,
    validator: AppointmentValidator,
    conflicts: Box<dyn ConflictDetection>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<dyn Repository<Appointment>>,
        doctors: Arc<dyn Repository<Doctor>>,
        patients: Arc<dyn Repository<Patient>>,
        validator: AppointmentValidator,
    ) -> Self {
        Self {
            appointments,
            doctors,
            patients,
            validator,
            conflicts: Box::new(IntervalScan),
        }
    }

    #[allow(dead_code)]
    pub fn with_conflict_detection(mut self, conflicts: Box<dyn ConflictDetection>) -> Self {
        self.conflicts = conflicts;
        self
    }

    pub fn get_all(&self, filter: &Filter) -> Result<FilteredList<Appointment>, DomainError> {
        if filter.current_page < 0 || filter.items_per_page < 0 {
            return Err(DomainError::InvalidRequest(
                "current page and items per page can't be negative".to_string(),
            ));
        }
        if filter.current_page * filter.items_per_page >= self.appointments.count() {
            return Err(DomainError::not_found("no more appointments"));
        }
        Ok(self.appointments.get_all(filter))
    }

    pub fn get_by_id(&self, id: i32) -> Result<Appointment, DomainError> {
        self.validator.id_validation(id)?;
        self.appointments
            .get_by_id(&id)
            .ok_or_else(|| DomainError::not_found("An appointment with this id does not exist"))
    }

    pub fn add(&self, appointment: Appointment) -> Result<Appointment, DomainError> {
        self.validator.create_validation(Some(&appointment))?;
        self.related_entities_validation(&appointment)?;

        let existing = self.appointments.get_all(&Filter::default());
        if self.conflicts.has_conflict(&appointment, &existing.list) {
            tracing::warn!(
                doctor = appointment.doctor_email_address.as_deref().unwrap_or(""),
                "rejected double booking"
            );
            return Err(DomainError::Conflict(
                "An appointment for this doctor in this time-frame is already taken".to_string(),
            ));
        }

        let stored = self.appointments.add(appointment)?;
        tracing::info!(appointment_id = stored.appointment_id, "appointment booked");
        Ok(stored)
    }

    // Edit re-validates fields and relations but not the schedule; only add
    // re-checks the full set of intervals.
    pub fn edit(&self, appointment: Appointment) -> Result<Appointment, DomainError> {
        self.validator.edit_validation(Some(&appointment))?;
        if self.appointments.get_by_id(&appointment.appointment_id).is_none() {
            return Err(DomainError::not_found("appointment does not exists"));
        }
        self.related_entities_validation(&appointment)?;

        let stored = self.appointments.edit(appointment)?;
        tracing::info!(appointment_id = stored.appointment_id, "appointment updated");
        Ok(stored)
    }

    pub fn remove(&self, id: i32) -> Result<Appointment, DomainError> {
        self.validator.id_validation(id)?;
        if self.appointments.get_by_id(&id).is_none() {
            return Err(DomainError::not_found("Appointment does not exist"));
        }
        let removed = self
            .appointments
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Appointment does not exist"))?;
        tracing::info!(appointment_id = id, "appointment removed");
        Ok(removed)
    }

    /// References are checked only when present; presence of the doctor
    /// reference itself is the validator's job.
    fn related_entities_validation(&self, appointment: &Appointment) -> Result<(), DomainError> {
        if let Some(email) = &appointment.doctor_email_address {
            if self.doctors.get_by_id(email).is_none() {
                return Err(DomainError::not_found("Doctor does not exist in database"));
            }
        }
        if let Some(cpr) = &appointment.patient_cpr {
            if self.patients.get_by_id(cpr).is_none() {
                return Err(DomainError::not_found("This related entity does not exist"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use chrono::{Duration, Utc};

    struct Fixture {
        appointments: Arc<InMemoryRepository<Appointment>>,
        doctors: Arc<InMemoryRepository<Doctor>>,
        patients: Arc<InMemoryRepository<Patient>>,
        service: AppointmentService,
    }

    fn fixture() -> Fixture {
        let appointments = Arc::new(InMemoryRepository::<Appointment>::new());
        let doctors = Arc::new(InMemoryRepository::<Doctor>::new());
        let patients = Arc::new(InMemoryRepository::<Patient>::new());
        let service = AppointmentService::new(
            appointments.clone(),
            doctors.clone(),
            patients.clone(),
            AppointmentValidator,
        );
        Fixture {
            appointments,
            doctors,
            patients,
            service,
        }
    }

    fn seed_relations(f: &Fixture) {
        for email in ["Karl@gmail.com", "Charlie@gmail.uk"] {
            f.doctors
                .add(Doctor {
                    doctor_email_address: Some(email.to_string()),
                    ..Default::default()
                })
                .unwrap();
        }
        for cpr in ["011200-4041", "110695-0004"] {
            f.patients
                .add(Patient {
                    patient_cpr: Some(cpr.to_string()),
                    ..Default::default()
                })
                .unwrap();
        }
    }

    fn valid_appointment(doctor: &str, patient: Option<&str>) -> Appointment {
        Appointment {
            appointment_id: 0,
            appointment_date_time: Some(Utc::now() + Duration::days(3)),
            duration_in_min: 15,
            description: None,
            doctor_email_address: Some(doctor.to_string()),
            patient_cpr: patient.map(str::to_string),
        }
    }

    #[test]
    fn get_all_with_empty_filter_returns_everything() {
        let f = fixture();
        for _ in 0..3 {
            f.appointments.add(Appointment::default()).unwrap();
        }

        let result = f.service.get_all(&Filter::default()).unwrap();
        assert_eq!(result.total_count, 3);
        assert_eq!(result.list.len(), 3);
        assert_eq!(result.filter_used, Filter::default());
    }

    #[test]
    fn get_all_rejects_negative_paging_before_querying() {
        let f = fixture();
        f.appointments.add(Appointment::default()).unwrap();

        let filter = Filter {
            current_page: -1,
            ..Default::default()
        };
        let err = f.service.get_all(&filter).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidRequest(
                "current page and items per page can't be negative".to_string()
            )
        );
    }

    #[test]
    fn get_all_rejects_pages_beyond_the_data() {
        let cases = [(3, 2, 3), (6, 2, 6), (6, 3, 3)];
        for (stored, current_page, items_per_page) in cases {
            let f = fixture();
            for _ in 0..stored {
                f.appointments.add(Appointment::default()).unwrap();
            }

            let filter = Filter {
                current_page,
                items_per_page,
                ..Default::default()
            };
            let err = f.service.get_all(&filter).unwrap_err();
            assert_eq!(err, DomainError::not_found("no more appointments"));
        }
    }

    #[test]
    fn get_by_id_returns_the_stored_appointment() {
        let f = fixture();
        let stored = f.appointments.add(Appointment::default()).unwrap();

        let found = f.service.get_by_id(stored.appointment_id).unwrap();
        assert_eq!(found, stored);
    }

    #[test]
    fn get_by_id_rejects_unknown_ids() {
        let f = fixture();
        let err = f.service.get_by_id(1).unwrap_err();
        assert_eq!(
            err,
            DomainError::not_found("An appointment with this id does not exist")
        );
    }

    #[test]
    fn get_by_id_rejects_negative_ids_without_lookup() {
        let f = fixture();
        let err = f.service.get_by_id(-1).unwrap_err();
        assert_eq!(err, DomainError::invalid_argument("Id cannot be negative"));
    }

    #[test]
    fn add_stores_a_valid_appointment_and_assigns_an_id() {
        let f = fixture();
        seed_relations(&f);

        for appointment in [
            valid_appointment("Karl@gmail.com", Some("011200-4041")),
            valid_appointment("Charlie@gmail.uk", None),
        ] {
            let stored = f.service.add(appointment).unwrap();
            assert!(stored.appointment_id > 0);
            assert_eq!(f.service.get_by_id(stored.appointment_id).unwrap(), stored);
        }
    }

    #[test]
    fn add_rejects_a_missing_doctor_before_persisting() {
        let f = fixture();
        // no doctors seeded at all
        let err = f
            .service
            .add(valid_appointment("Karl@gmail.com", None))
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("Doctor does not exist in database"));
        assert_eq!(f.appointments.count(), 0);
    }

    #[test]
    fn add_rejects_a_missing_patient_reference() {
        let f = fixture();
        f.doctors
            .add(Doctor {
                doctor_email_address: Some("Karl@gmail.com".to_string()),
                ..Default::default()
            })
            .unwrap();

        let err = f
            .service
            .add(valid_appointment("Karl@gmail.com", Some("011200-4041")))
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("This related entity does not exist"));
        assert_eq!(f.appointments.count(), 0);
    }

    #[test]
    fn add_runs_validation_before_reference_checks() {
        let f = fixture();
        // invalid (no duration) and the doctor is missing too; validation wins
        let mut appointment = valid_appointment("Karl@gmail.com", None);
        appointment.duration_in_min = 0;

        let err = f.service.add(appointment).unwrap_err();
        assert_eq!(err, DomainError::invalid_argument("an appointment needs a duration"));
    }

    #[test]
    fn add_books_disjoint_slots_and_rejects_taken_ones() {
        let f = fixture();
        seed_relations(&f);
        let t = Utc::now() + Duration::days(2);

        for offset in [16, 31] {
            let mut appointment = valid_appointment("Karl@gmail.com", None);
            appointment.appointment_date_time = Some(t + Duration::minutes(offset));
            f.service.add(appointment).unwrap();
        }

        // disjoint slot right before the first booking
        let mut first_slot = valid_appointment("Karl@gmail.com", None);
        first_slot.appointment_date_time = Some(t);
        f.service.add(first_slot).unwrap();

        // both occupied slots are rejected
        for offset in [16, 31] {
            let mut taken = valid_appointment("Karl@gmail.com", None);
            taken.appointment_date_time = Some(t + Duration::minutes(offset));
            let err = f.service.add(taken).unwrap_err();
            assert_eq!(
                err,
                DomainError::Conflict(
                    "An appointment for this doctor in this time-frame is already taken".to_string()
                )
            );
        }

        // the same slot is free for another doctor
        let mut other_doctor = valid_appointment("Charlie@gmail.uk", None);
        other_doctor.appointment_date_time = Some(t + Duration::minutes(16));
        f.service.add(other_doctor).unwrap();
    }

    #[test]
    fn add_accepts_a_slot_starting_at_an_existing_end() {
        let f = fixture();
        seed_relations(&f);
        let t = Utc::now() + Duration::days(2);

        let mut first = valid_appointment("Karl@gmail.com", None);
        first.appointment_date_time = Some(t);
        f.service.add(first).unwrap();

        let mut adjacent = valid_appointment("Karl@gmail.com", None);
        adjacent.appointment_date_time = Some(t + Duration::minutes(15));
        f.service.add(adjacent).unwrap();
    }

    #[test]
    fn edit_replaces_an_existing_appointment() {
        let f = fixture();
        seed_relations(&f);

        let stored = f
            .service
            .add(valid_appointment("Karl@gmail.com", Some("011200-4041")))
            .unwrap();

        let mut edited = valid_appointment("Charlie@gmail.uk", Some("110695-0004"));
        edited.appointment_id = stored.appointment_id;
        edited.description = Some("Knee checkup".to_string());

        let result = f.service.edit(edited.clone()).unwrap();
        assert_eq!(result, edited);
        assert_eq!(f.service.get_by_id(stored.appointment_id).unwrap(), edited);
    }

    #[test]
    fn edit_rejects_an_unknown_appointment_id() {
        let f = fixture();
        seed_relations(&f);

        let mut edited = valid_appointment("Karl@gmail.com", Some("011200-4041"));
        edited.appointment_id = 1;

        let err = f.service.edit(edited).unwrap_err();
        assert_eq!(err, DomainError::not_found("appointment does not exists"));
    }

    #[test]
    fn edit_rejects_missing_relations() {
        let f = fixture();
        f.appointments
            .add(Appointment {
                appointment_id: 1,
                ..Default::default()
            })
            .unwrap();

        let mut edited = valid_appointment("Karl@gmail.com", Some("011200-4041"));
        edited.appointment_id = 1;

        let err = f.service.edit(edited).unwrap_err();
        assert_eq!(err, DomainError::not_found("Doctor does not exist in database"));
    }

    #[test]
    fn edit_does_not_rerun_the_conflict_check() {
        let f = fixture();
        seed_relations(&f);
        let t = Utc::now() + Duration::days(2);

        let mut first = valid_appointment("Karl@gmail.com", None);
        first.appointment_date_time = Some(t);
        let first = f.service.add(first).unwrap();

        let mut second = valid_appointment("Karl@gmail.com", None);
        second.appointment_date_time = Some(t + Duration::minutes(30));
        let second = f.service.add(second).unwrap();

        // moving the second booking onto the first is accepted as-is
        let mut onto_first = valid_appointment("Karl@gmail.com", None);
        onto_first.appointment_id = second.appointment_id;
        onto_first.appointment_date_time = first.appointment_date_time;
        assert!(f.service.edit(onto_first).is_ok());
    }

    #[test]
    fn remove_deletes_and_returns_the_appointment() {
        let f = fixture();
        let stored = f.appointments.add(Appointment::default()).unwrap();

        let removed = f.service.remove(stored.appointment_id).unwrap();
        assert_eq!(removed, stored);
        assert_eq!(
            f.service.get_by_id(stored.appointment_id).unwrap_err(),
            DomainError::not_found("An appointment with this id does not exist")
        );
    }

    #[test]
    fn remove_rejects_an_unknown_id() {
        let f = fixture();
        let err = f.service.remove(1).unwrap_err();
        assert_eq!(err, DomainError::not_found("Appointment does not exist"));
    }
}
