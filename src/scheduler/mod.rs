//! Schedule generation strategies.
//!
//! Two ways to produce a week for a batch:
//!
//! - [`generate_options`]: the genetic engine wrapped as named options
//!   (the primary path)
//! - [`GreedyScheduler`] / [`generate_timetable`]: fast deterministic
//!   first-fit placement against the availability index
//!
//! Both share the crate's block policy and constraint evaluation.

mod greedy;
mod options;

pub use greedy::GreedyScheduler;
pub use options::{generate_options, generate_suggestions, generate_timetable, TimetableOption};
