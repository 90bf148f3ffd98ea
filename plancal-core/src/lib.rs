//! Core library for plancal.
//!
//! - `parse` turns pasted text and quick-add sentences into event drafts
//! - `layout` assigns multi-day events to lanes for week rendering
//! - `config` holds the operating-year window imports are clipped to

pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod parse;

pub use error::{PlanCalError, PlanCalResult};
pub use event::{Event, EventDraft, EventType, Schedule};

use chrono::{Datelike, Local, NaiveDate};

/// Today's date on the local calendar, built from the local year, month and
/// day so it never shifts across midnight the way a UTC conversion can.
pub fn local_today() -> NaiveDate {
    let now = Local::now();
    NaiveDate::from_ymd_opt(now.year(), now.month(), now.day()).unwrap_or_else(|| now.date_naive())
}
