//! Response DTOs
//!
//! Views assembled from several repository reads.

use chrono::NaiveDate;
use serde::Serialize;

use portal_core::entities::{MaintenanceReport, ReportStatus, Shift};

// ============================================================================
// Schedule Responses
// ============================================================================

/// Shifts of one calendar day
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    /// Monday = 1 ... Sunday = 7
    pub day_of_week: u8,
    /// e.g. `Monday • Mar 04, 2024`
    pub label: String,
    pub shifts: Vec<Shift>,
}

/// Seven consecutive days starting on a Monday
#[derive(Debug, Clone, Serialize)]
pub struct WeekSchedule {
    pub week_start: NaiveDate,
    pub days: Vec<DaySchedule>,
}

impl WeekSchedule {
    pub fn total_shifts(&self) -> usize {
        self.days.iter().map(|day| day.shifts.len()).sum()
    }

    /// Every shift of the week, in date order
    pub fn shifts(&self) -> impl Iterator<Item = &Shift> {
        self.days.iter().flat_map(|day| day.shifts.iter())
    }
}

// ============================================================================
// Board Responses
// ============================================================================

/// Number of maintenance reports in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportCounts {
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl ReportCounts {
    pub fn tally(reports: &[MaintenanceReport]) -> Self {
        reports.iter().fold(Self::default(), |mut counts, report| {
            match report.status {
                ReportStatus::Open => counts.open += 1,
                ReportStatus::InProgress => counts.in_progress += 1,
                ReportStatus::Resolved => counts.resolved += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.open + self.in_progress + self.resolved
    }
}
