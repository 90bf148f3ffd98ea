//! Calendar grid geometry and multi-day lane layout.

pub mod grid;
pub mod lanes;

pub use grid::{
    BUSINESS_DAYS_PER_WEEK, Spanning, WeekLayout, WeekSlot, assign_week_lanes,
    business_days_of_week, is_business_day, month_business_weeks,
};
pub use lanes::{DayInterval, LaneAssignment, assign_lanes, week_interval};
