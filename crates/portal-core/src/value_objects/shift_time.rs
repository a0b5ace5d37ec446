//! Shift time of day (`HH:mm`)

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

const WIRE_FORMAT: &str = "%H:%M";

/// Time of day a shift starts or ends, minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShiftTime(NaiveTime);

impl ShiftTime {
    /// Build from hour and minute
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, DomainError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidTime(format!("{hour:02}:{minute:02}")))
    }

    /// Parse `HH:mm` (a single-digit hour is accepted)
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        NaiveTime::parse_from_str(s.trim(), WIRE_FORMAT)
            .map(Self)
            .map_err(|_| DomainError::InvalidTime(s.to_string()))
    }

    /// Minutes since midnight
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    #[inline]
    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    /// 12-hour clock label, e.g. `9:00 AM`
    pub fn to_12h(&self) -> String {
        let hour = self.0.hour();
        let suffix = if hour >= 12 { "PM" } else { "AM" };
        let display = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{display}:{:02} {suffix}", self.0.minute())
    }
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` share an instant
#[inline]
pub fn intervals_overlap(s1: ShiftTime, e1: ShiftTime, s2: ShiftTime, e2: ShiftTime) -> bool {
    s1 < e2 && s2 < e1
}

impl fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl FromStr for ShiftTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ShiftTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShiftTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ShiftTime {
        ShiftTime::parse(s).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(t("09:00").to_string(), "09:00");
        assert_eq!(t("9:05").to_string(), "09:05");
        assert_eq!(t("23:59").minutes(), 23 * 60 + 59);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ShiftTime::parse("25:00").is_err());
        assert!(ShiftTime::parse("noon").is_err());
        assert!(ShiftTime::parse("").is_err());
        assert!(ShiftTime::from_hm(24, 0).is_err());
    }

    #[test]
    fn test_twelve_hour_label() {
        assert_eq!(t("00:30").to_12h(), "12:30 AM");
        assert_eq!(t("09:00").to_12h(), "9:00 AM");
        assert_eq!(t("12:00").to_12h(), "12:00 PM");
        assert_eq!(t("17:45").to_12h(), "5:45 PM");
    }

    #[test]
    fn test_overlap_is_half_open() {
        // touching at 17:00 is not an overlap
        assert!(!intervals_overlap(t("09:00"), t("17:00"), t("17:00"), t("20:00")));
        assert!(intervals_overlap(t("09:00"), t("17:00"), t("16:00"), t("20:00")));
        // containment
        assert!(intervals_overlap(t("09:00"), t("17:00"), t("10:00"), t("11:00")));
        // symmetric
        assert!(intervals_overlap(t("16:00"), t("20:00"), t("09:00"), t("17:00")));
    }

    #[test]
    fn test_serde_uses_wire_format() {
        let json = serde_json::to_string(&t("08:15")).unwrap();
        assert_eq!(json, "\"08:15\"");

        let back: ShiftTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t("08:15"));

        assert!(serde_json::from_str::<ShiftTime>("\"8 o'clock\"").is_err());
    }
}
