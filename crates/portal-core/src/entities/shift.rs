//! Shift entity - one staff member's availability on one calendar day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{intervals_overlap, RecordId, ShiftTime};

/// A same-day shift. `start_time` is always strictly before `end_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: RecordId,
    pub user_name: String,
    pub date: NaiveDate,
    pub start_time: ShiftTime,
    pub end_time: ShiftTime,
}

impl Shift {
    /// Create a shift, rejecting blank names and empty or inverted ranges
    pub fn new(
        id: RecordId,
        user_name: impl Into<String>,
        date: NaiveDate,
        start_time: ShiftTime,
        end_time: ShiftTime,
    ) -> Result<Self, DomainError> {
        let user_name = user_name.into();
        if user_name.trim().is_empty() {
            return Err(DomainError::ValidationError("Name is required".to_string()));
        }
        Self::validate_range(start_time, end_time)?;
        Ok(Self {
            id,
            user_name,
            date,
            start_time,
            end_time,
        })
    }

    /// `start` must be strictly before `end`
    pub fn validate_range(start: ShiftTime, end: ShiftTime) -> Result<(), DomainError> {
        if start < end {
            Ok(())
        } else {
            Err(DomainError::InvalidRange { start, end })
        }
    }

    /// Same person, same day, and the half-open intervals intersect
    pub fn conflicts_with(&self, other: &Shift) -> bool {
        self.user_name == other.user_name
            && self.date == other.date
            && intervals_overlap(
                self.start_time,
                self.end_time,
                other.start_time,
                other.end_time,
            )
    }

    /// Length of the shift in minutes
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end_time.minutes() - self.start_time.minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(user: &str, date: &str, start: &str, end: &str) -> Shift {
        Shift::new(
            RecordId::new(format!("{user}-{start}")),
            user,
            crate::value_objects::parse_date(date).unwrap(),
            ShiftTime::parse(start).unwrap(),
            ShiftTime::parse(end).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_and_empty_ranges() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let nine = ShiftTime::parse("09:00").unwrap();
        let five = ShiftTime::parse("17:00").unwrap();

        let err = Shift::new(RecordId::new("x"), "A", date, five, nine).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRange { .. }));

        let err = Shift::new(RecordId::new("x"), "A", date, nine, nine).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRange { .. }));
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let nine = ShiftTime::parse("09:00").unwrap();
        let ten = ShiftTime::parse("10:00").unwrap();

        let err = Shift::new(RecordId::new("x"), "   ", date, nine, ten).unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn test_conflicts_with() {
        let day = shift("A", "2024-01-01", "09:00", "17:00");

        assert!(day.conflicts_with(&shift("A", "2024-01-01", "16:00", "20:00")));
        assert!(!day.conflicts_with(&shift("A", "2024-01-01", "17:00", "20:00")));
        assert!(!day.conflicts_with(&shift("B", "2024-01-01", "10:00", "12:00")));
        assert!(!day.conflicts_with(&shift("A", "2024-01-02", "10:00", "12:00")));
    }

    #[test]
    fn test_wire_format() {
        let s = shift("Hala Samer", "2024-01-01", "09:00", "17:30");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["end_time"], "17:30");
        assert_eq!(s.duration_minutes(), 510);
    }
}
