//! Calendar periods used to group events.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// The span a range query covers around an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Exactly the anchor date.
    Day,
    /// The ISO-8601 week (Monday to Sunday) of the anchor date.
    Week,
    /// The calendar month of the anchor date.
    Month,
}

impl Period {
    /// Whether `date` falls in the same period as `anchor`.
    pub fn contains(self, anchor: NaiveDate, date: NaiveDate) -> bool {
        match self {
            Period::Day => anchor == date,
            // IsoWeek compares both the ISO year and the week number
            Period::Week => anchor.iso_week() == date.iso_week(),
            Period::Month => anchor.year() == date.year() && anchor.month() == date.month(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        };
        write!(f, "{}", name)
    }
}
