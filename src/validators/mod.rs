pub mod appointment_validator;
pub mod doctor_validator;
pub mod patient_validator;

pub use appointment_validator::AppointmentValidator;
pub use doctor_validator::DoctorValidator;
pub use patient_validator::PatientValidator;

use chrono::NaiveDate;

/// Local-part@domain, domain with exactly one dot and non-empty labels.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    let mut labels = domain.split('.');
    matches!(
        (labels.next(), labels.next(), labels.next()),
        (Some(name), Some(tld), None) if !name.is_empty() && !tld.is_empty()
    )
}

/// Eight digits; spaces between groups are accepted.
pub(crate) fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    digits.len() == 8 && digits.chars().all(|c| c.is_ascii_digit())
}

/// Six digits, hyphen, four digits; the first six must form a real
/// DDMMYY calendar date in either century.
pub(crate) fn is_valid_cpr(cpr: &str) -> bool {
    let bytes = cpr.as_bytes();
    if bytes.len() != 11 || bytes[6] != b'-' {
        return false;
    }
    if !cpr[..6].chars().all(|c| c.is_ascii_digit())
        || !cpr[7..].chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }

    let day: u32 = cpr[0..2].parse().unwrap_or(0);
    let month: u32 = cpr[2..4].parse().unwrap_or(0);
    let year: i32 = cpr[4..6].parse().unwrap_or(0);

    NaiveDate::from_ymd_opt(1900 + year, month, day).is_some()
        || NaiveDate::from_ymd_opt(2000 + year, month, day).is_some()
}

/// At least two characters and no digits.
pub(crate) fn is_valid_person_name(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().count() >= 2 && !trimmed.chars().any(|c| c.is_ascii_digit())
}
