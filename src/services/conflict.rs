use crate::models::Appointment;

/// Strategy seam for double-booking detection. The default is a linear scan,
/// which is plenty at expected volumes; an interval-tree variant can be
/// swapped in here without touching the service.
pub trait ConflictDetection: Send + Sync {
    /// True when the candidate's interval `[start, start+duration)` overlaps
    /// a stored appointment for the same doctor.
    fn has_conflict(&self, candidate: &Appointment, stored: &[Appointment]) -> bool;
}

pub struct IntervalScan;

impl ConflictDetection for IntervalScan {
    fn has_conflict(&self, candidate: &Appointment, stored: &[Appointment]) -> bool {
        let (Some(start), Some(end)) = (candidate.appointment_date_time, candidate.end_time())
        else {
            return false;
        };
        let Some(doctor) = candidate.doctor_email_address.as_deref() else {
            return false;
        };

        stored
            .iter()
            .filter(|other| other.doctor_email_address.as_deref() == Some(doctor))
            .any(|other| match (other.appointment_date_time, other.end_time()) {
                // two intervals conflict when neither is entirely before the other
                (Some(other_start), Some(other_end)) => start < other_end && other_start < end,
                _ => false,
            })
    }
}
