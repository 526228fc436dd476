use std::sync::Arc;

use crate::error::DomainError;
use crate::models::{Filter, FilteredList, Patient};
use crate::repository::Repository;
use crate::validators::PatientValidator;

/// CRUD over patients. Unlike doctors, a duplicate add is rejected here in
/// the service rather than left to the repository.
pub struct PatientService {
    patients: Arc<dyn Repository<Patient>>,
    validator: PatientValidator,
}

impl PatientService {
    pub fn new(patients: Arc<dyn Repository<Patient>>, validator: PatientValidator) -> Self {
        Self { patients, validator }
    }

    pub fn get_all(&self, filter: &Filter) -> Result<FilteredList<Patient>, DomainError> {
        if filter.current_page < 0 || filter.items_per_page < 0 {
            return Err(DomainError::InvalidRequest(
                "current page and items per page can't be negative".to_string(),
            ));
        }
        if filter.current_page * filter.items_per_page >= self.patients.count() {
            return Err(DomainError::not_found("no more patients"));
        }
        Ok(self.patients.get_all(filter))
    }

    pub fn get_by_id(&self, cpr: &str) -> Result<Patient, DomainError> {
        self.validator.validate_cpr(cpr)?;
        self.patients
            .get_by_id(&cpr.to_string())
            .ok_or_else(|| DomainError::not_found("Patient does not exist"))
    }

    pub fn add(&self, patient: Patient) -> Result<Patient, DomainError> {
        self.validator.default_validator(Some(&patient))?;
        let cpr = patient.patient_cpr.clone().unwrap_or_default();
        if self.patients.get_by_id(&cpr).is_some() {
            return Err(DomainError::InvalidState(
                "Patient is already in the database".to_string(),
            ));
        }
        let stored = self.patients.add(patient)?;
        tracing::info!(%cpr, "patient registered");
        Ok(stored)
    }

    pub fn edit(&self, patient: Patient) -> Result<Patient, DomainError> {
        self.validator.default_validator(Some(&patient))?;
        let cpr = patient.patient_cpr.clone().unwrap_or_default();
        if self.patients.get_by_id(&cpr).is_none() {
            return Err(DomainError::not_found("Patient is not in the database"));
        }
        self.patients.edit(patient)
    }

    pub fn remove(&self, cpr: &str) -> Result<Patient, DomainError> {
        self.validator.validate_cpr(cpr)?;
        if self.patients.get_by_id(&cpr.to_string()).is_none() {
            return Err(DomainError::not_found("Nonexistant patient cannot be removed!"));
        }
        let removed = self
            .patients
            .remove(&cpr.to_string())
            .ok_or_else(|| DomainError::not_found("Nonexistant patient cannot be removed!"))?;
        tracing::info!(cpr, "patient removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    struct Fixture {
        patients: Arc<InMemoryRepository<Patient>>,
        service: PatientService,
    }

    fn fixture() -> Fixture {
        let patients = Arc::new(InMemoryRepository::<Patient>::new());
        let service = PatientService::new(patients.clone(), PatientValidator);
        Fixture { patients, service }
    }

    fn valid_patient(cpr: &str, first_name: &str) -> Patient {
        Patient {
            patient_cpr: Some(cpr.to_string()),
            patient_first_name: Some(first_name.to_string()),
            patient_last_name: Some("mikeowsky".to_string()),
            patient_phone: Some("40506090".to_string()),
            patient_email: Some("mike@hotmail.com".to_string()),
        }
    }

    #[test]
    fn get_all_with_empty_filter_returns_everything() {
        let f = fixture();
        f.patients.add(valid_patient("011200-4106", "mike")).unwrap();
        f.patients.add(valid_patient("011200-4107", "jake")).unwrap();

        let result = f.service.get_all(&Filter::default()).unwrap();
        assert_eq!(result.total_count, 2);
        assert_eq!(result.list.len(), 2);
    }

    #[test]
    fn get_all_rejects_negative_paging() {
        let f = fixture();
        f.patients.add(valid_patient("011200-4106", "mike")).unwrap();

        let filter = Filter {
            current_page: -1,
            ..Default::default()
        };
        assert_eq!(
            f.service.get_all(&filter).unwrap_err(),
            DomainError::InvalidRequest(
                "current page and items per page can't be negative".to_string()
            )
        );
    }

    #[test]
    fn get_all_rejects_pages_beyond_the_data() {
        let f = fixture();
        for cpr in ["011200-4106", "011200-4107", "011200-4108"] {
            f.patients.add(valid_patient(cpr, "mike")).unwrap();
        }

        let filter = Filter {
            current_page: 2,
            items_per_page: 3,
            ..Default::default()
        };
        assert_eq!(
            f.service.get_all(&filter).unwrap_err(),
            DomainError::not_found("no more patients")
        );
    }

    #[test]
    fn get_by_id_returns_the_stored_patient() {
        let f = fixture();
        let stored = f.patients.add(valid_patient("011200-4106", "mike")).unwrap();

        assert_eq!(f.service.get_by_id("011200-4106").unwrap(), stored);
    }

    #[test]
    fn get_by_id_validates_the_key_first() {
        let f = fixture();
        assert_eq!(
            f.service.get_by_id("400429-0677").unwrap_err(),
            DomainError::invalid_argument("Patient CPR has to be a valid CPR number")
        );
    }

    #[test]
    fn get_by_id_rejects_unknown_patients() {
        let f = fixture();
        assert_eq!(
            f.service.get_by_id("011200-4106").unwrap_err(),
            DomainError::not_found("Patient does not exist")
        );
    }

    #[test]
    fn add_stores_a_valid_patient() {
        let f = fixture();
        let stored = f.service.add(valid_patient("011200-4106", "mike")).unwrap();
        assert_eq!(f.patients.count(), 1);
        assert_eq!(f.service.get_by_id("011200-4106").unwrap(), stored);
    }

    #[test]
    fn add_rejects_a_patient_already_in_the_database() {
        let f = fixture();
        f.service.add(valid_patient("150429-0677", "hans")).unwrap();

        assert_eq!(
            f.service.add(valid_patient("150429-0677", "hans")).unwrap_err(),
            DomainError::InvalidState("Patient is already in the database".to_string())
        );
    }

    #[test]
    fn add_rejects_an_invalid_patient_before_persisting() {
        let f = fixture();
        let mut patient = valid_patient("011200-4106", "mike");
        patient.patient_email = Some("mikehotmail.com".to_string());

        assert_eq!(
            f.service.add(patient).unwrap_err(),
            DomainError::invalid_argument("Patient Email has to be a valid Email")
        );
        assert_eq!(f.patients.count(), 0);
    }

    #[test]
    fn edit_replaces_an_existing_patient() {
        let f = fixture();
        f.patients.add(valid_patient("011200-4106", "mike")).unwrap();

        let edited = valid_patient("011200-4106", "michael");
        let result = f.service.edit(edited.clone()).unwrap();
        assert_eq!(result, edited);
        assert_eq!(f.service.get_by_id("011200-4106").unwrap(), edited);
    }

    #[test]
    fn edit_rejects_a_patient_not_in_the_database() {
        let f = fixture();
        assert_eq!(
            f.service.edit(valid_patient("011200-4106", "jake")).unwrap_err(),
            DomainError::not_found("Patient is not in the database")
        );
    }

    #[test]
    fn remove_deletes_and_returns_the_patient() {
        let f = fixture();
        let stored = f.patients.add(valid_patient("011200-4106", "mike")).unwrap();

        let removed = f.service.remove("011200-4106").unwrap();
        assert_eq!(removed, stored);
        assert!(f.patients.get_by_id(&"011200-4106".to_string()).is_none());
    }

    #[test]
    fn remove_rejects_an_unknown_patient() {
        let f = fixture();
        assert_eq!(
            f.service.remove("011200-4106").unwrap_err(),
            DomainError::not_found("Nonexistant patient cannot be removed!")
        );
    }
}
