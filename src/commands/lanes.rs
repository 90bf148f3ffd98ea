use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use plancal_core::Event;
use plancal_core::layout::{assign_week_lanes, business_days_of_week, month_business_weeks};
use plancal_core::parse::{BulkOptions, parse_bulk_text};

use crate::render::render_week;
use crate::utils::dates::{parse_day, parse_month};
use crate::utils::input::read_input;

/// Which weeks to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Month { year: i32, month: u32 },
    Week(NaiveDate),
}

impl View {
    /// `--on` wins over `--month`; with neither, the current month.
    pub fn from_args(month: Option<&str>, on: Option<&str>) -> Result<Self> {
        if let Some(phrase) = on {
            return Ok(View::Week(parse_day(phrase)?));
        }
        let (year, month) = match month {
            Some(input) => parse_month(input)?,
            None => {
                let today = plancal_core::local_today();
                (today.year(), today.month())
            }
        };
        Ok(View::Month { year, month })
    }

    fn weeks(&self) -> Result<Vec<Vec<NaiveDate>>> {
        match *self {
            View::Month { year, month } => {
                month_business_weeks(year, month).map_err(|e| anyhow::anyhow!(e))
            }
            View::Week(day) => Ok(vec![business_days_of_week(day)]),
        }
    }
}

pub fn run(file: &Path, options: &BulkOptions, view: View) -> Result<()> {
    let text = read_input(Some(file))?;
    let events: Vec<Event> = parse_bulk_text(&text, options)
        .into_iter()
        .map(Event::from_draft)
        .collect();

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, week) in view.weeks()?.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let layout = assign_week_lanes(&events, week);
        println!("{}", render_week(&layout, &events));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_takes_precedence() {
        let view = View::from_args(Some("2025-07"), Some("2025-07-30")).unwrap();
        assert_eq!(
            view,
            View::Week(NaiveDate::from_ymd_opt(2025, 7, 30).unwrap())
        );
    }

    #[test]
    fn month_view_lists_business_weeks() {
        let view = View::from_args(Some("2025-07"), None).unwrap();
        assert_eq!(
            view,
            View::Month {
                year: 2025,
                month: 7
            }
        );
        assert_eq!(view.weeks().unwrap().len(), 5);
    }

    #[test]
    fn bad_month_is_an_error() {
        assert!(View::from_args(Some("July"), None).is_err());
    }
}
