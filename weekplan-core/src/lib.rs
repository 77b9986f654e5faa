//! Core types and rendering for weekplan.
//!
//! This crate holds everything that does not talk to a real calendar API:
//! - `event` and `source` for the provider-neutral event model and the
//!   `CalendarSource` seam
//! - `weeks` for walking a year's month grid
//! - `day` for bucketing a day's events into display slots
//! - `latex` for composing pages and the final document
//! - `emit` for writing `.tex` output or compiling it to `.pdf`

pub mod credentials;
pub mod day;
pub mod emit;
pub mod error;
pub mod event;
pub mod latex;
pub mod locale;
pub mod planner;
pub mod source;
pub mod weeks;

pub use error::{PlannerError, PlannerResult};
pub use event::{Event, EventTime};
pub use locale::Locale;
