//! Error types for daybook.

use thiserror::Error;

use crate::period::Period;

/// Errors that can occur when building events or operating on the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DaybookError {
    #[error("event id is empty")]
    EmptyEventId,

    #[error("user id is empty")]
    EmptyUserId,

    #[error("date is empty")]
    EmptyDate,

    #[error("wrong date format: {0}. Valid date format: YYYY-MM-DD")]
    InvalidDate(String),

    #[error("event with this id already exists")]
    DuplicateId(String),

    #[error("event with this id doesn't exist")]
    NotFound(String),

    #[error("no events for this {0}")]
    EmptyResult(Period),
}

impl DaybookError {
    /// True for errors raised while validating input, before the store is touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DaybookError::EmptyEventId
                | DaybookError::EmptyUserId
                | DaybookError::EmptyDate
                | DaybookError::InvalidDate(_)
        )
    }
}

/// Result type alias for daybook operations.
pub type DaybookResult<T> = Result<T, DaybookError>;
