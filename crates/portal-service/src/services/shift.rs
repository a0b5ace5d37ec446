//! Shift service
//!
//! Handles adding and removing shifts and the daily and weekly schedule views.

use chrono::NaiveDate;
use tracing::{info, instrument};
use validator::Validate;

use portal_core::entities::Shift;
use portal_core::{
    day_of_week, format_date_with_day, week_dates, week_start, PortalEvent, RecordId,
};

use crate::dto::{AddShiftRequest, DaySchedule, WeekSchedule};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Shift service
pub struct ShiftService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShiftService<'a> {
    /// Create a new ShiftService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a shift. Inverted ranges and overlaps with the same person's
    /// shifts that day are rejected and leave the schedule unchanged.
    #[instrument(skip(self, request), fields(user_name = %request.user_name, date = %request.date))]
    pub async fn add_shift(&self, request: AddShiftRequest) -> ServiceResult<Shift> {
        request.validate()?;
        let (date, start_time, end_time) = request.parse()?;

        let shift = Shift::new(
            self.ctx.generate_id(),
            request.user_name.trim(),
            date,
            start_time,
            end_time,
        )?;
        self.ctx.shift_repo().create(&shift).await?;

        info!(shift_id = %shift.id, "Shift added");
        self.ctx.publish(PortalEvent::ShiftAdded(shift.clone()));

        Ok(shift)
    }

    /// Shifts on one day, in the order they were added
    #[instrument(skip(self))]
    pub async fn shifts_for_date(&self, date: NaiveDate) -> ServiceResult<Vec<Shift>> {
        Ok(self.ctx.shift_repo().find_by_date(date).await?)
    }

    /// Shifts on the 7 days starting at `start`, in date order
    #[instrument(skip(self))]
    pub async fn shifts_for_week(&self, start: NaiveDate) -> ServiceResult<Vec<Shift>> {
        let mut shifts = Vec::new();
        for date in week_dates(start) {
            shifts.extend(self.ctx.shift_repo().find_by_date(date).await?);
        }
        Ok(shifts)
    }

    /// One person's shifts on one day
    pub async fn shifts_for_user_on(
        &self,
        user_name: &str,
        date: NaiveDate,
    ) -> ServiceResult<Vec<Shift>> {
        Ok(self
            .ctx
            .shift_repo()
            .find_for_user_on(user_name, date)
            .await?)
    }

    /// Remove a shift; `false` when no shift has this id
    #[instrument(skip(self))]
    pub async fn delete_shift(&self, id: &RecordId) -> ServiceResult<bool> {
        let deleted = self.ctx.shift_repo().delete(id).await?;

        if deleted {
            info!(shift_id = %id, "Shift deleted");
            self.ctx
                .publish(PortalEvent::ShiftDeleted { id: id.clone() });
        }
        Ok(deleted)
    }

    /// The Monday-to-Sunday week containing `date`, grouped by day
    #[instrument(skip(self))]
    pub async fn week_schedule(&self, date: NaiveDate) -> ServiceResult<WeekSchedule> {
        let start = week_start(date);

        let mut days = Vec::with_capacity(7);
        for date in week_dates(start) {
            let day = day_of_week(date);
            days.push(DaySchedule {
                date,
                day_of_week: day,
                label: format_date_with_day(date, day)?,
                shifts: self.ctx.shift_repo().find_by_date(date).await?,
            });
        }

        Ok(WeekSchedule {
            week_start: start,
            days,
        })
    }
}
