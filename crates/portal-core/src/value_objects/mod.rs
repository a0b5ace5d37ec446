//! Value objects - immutable, self-validating domain primitives

mod record_id;
mod shift_time;
mod week;

pub use record_id::{IdGenerator, RecordId};
pub use shift_time::{intervals_overlap, ShiftTime};
pub use week::{
    current_day_of_week, day_of_week, format_date_with_day, parse_date, week_dates, week_start,
    DAY_NAMES,
};
