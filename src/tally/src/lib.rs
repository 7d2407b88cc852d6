//! # tally
//!
//! Availability polling core: generates the calendar days people can vote on,
//! tracks each person's available/unavailable picks, and ranks the dates with
//! the most overlap.

#![warn(missing_docs)]
#![cfg_attr(
    not(any(test, debug_assertions)),
    deny(
        clippy::missing_panics_doc,
        clippy::panic,
        clippy::unimplemented,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "prefer errors over panicking"
    )
)]
#![cfg_attr(
    not(any(test, debug_assertions)),
    forbid(clippy::todo, reason = "production code should not use `todo`")
)]

pub mod algo;
pub mod calendar;
pub mod data;
pub mod error;

pub use algo::{ScoreEntry, compute_best_dates};
pub use calendar::{Calendar, DayCell, MonthGrid, generate_month, month_from_index};
pub use data::*;
pub use error::ValidationError;
