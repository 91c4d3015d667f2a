//! Calendar event type and input validation.
//!
//! Events can only be built through [`Event::new`], which rejects empty ids and
//! dates that are not in `YYYY-MM-DD` form. Once built, the owner and date of an
//! event never change; the store replaces events wholesale.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DaybookError, DaybookResult};

/// Textual date format exchanged with clients.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single calendar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    #[serde(rename = "event_id")]
    id: String,
    #[serde(rename = "user_id")]
    owner_id: String,
    date: NaiveDate,
    #[serde(rename = "event_content")]
    content: String,
}

impl Event {
    /// Validate the raw fields and build an event.
    ///
    /// Checks run in order: event id, user id, date. The first failure is returned.
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        date: &str,
        content: impl Into<String>,
    ) -> DaybookResult<Self> {
        let id = id.into();
        validate_event_id(&id)?;

        let owner_id = owner_id.into();
        validate_owner_id(&owner_id)?;

        let date = parse_date(date)?;

        Ok(Event {
            id,
            owner_id,
            date,
            content: content.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

pub fn validate_event_id(id: &str) -> DaybookResult<()> {
    if id.is_empty() {
        return Err(DaybookError::EmptyEventId);
    }
    Ok(())
}

pub fn validate_owner_id(owner_id: &str) -> DaybookResult<()> {
    if owner_id.is_empty() {
        return Err(DaybookError::EmptyUserId);
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date string.
///
/// Only the zero-padded, unsigned form is accepted: `2022-3-5` and
/// `+2022-03-05` are rejected even though chrono would read them.
pub fn parse_date(s: &str) -> DaybookResult<NaiveDate> {
    if s.is_empty() {
        return Err(DaybookError::EmptyDate);
    }

    let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DaybookError::InvalidDate(format!("'{}' ({})", s, e)))?;

    if date.format(DATE_FORMAT).to_string() != s {
        return Err(DaybookError::InvalidDate(format!("'{}' is not zero-padded", s)));
    }

    Ok(date)
}
