//! Core types for daybook.
//!
//! This crate provides the pieces shared by the daybook server and its tests:
//! - `Event` and its validated constructor
//! - `EventStore`, the in-memory, lock-guarded event collection
//! - `Period` for day / ISO week / month grouping
//! - `DaybookError`, the error taxonomy

pub mod error;
pub mod event;
pub mod period;
pub mod store;

pub use error::{DaybookError, DaybookResult};
pub use event::{DATE_FORMAT, Event, parse_date, validate_event_id, validate_owner_id};
pub use period::Period;
pub use store::EventStore;
