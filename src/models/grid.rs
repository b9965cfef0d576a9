//! Weekly time grid.
//!
//! The schedulable week is six days (Monday through Saturday) of seven
//! one-hour slots between 09:00 and 17:00, with a fixed lunch gap at
//! 12:00-13:00 that is never schedulable.
//!
//! # Time Model
//! All arithmetic uses minutes since midnight (`u32`). Intervals are
//! half-open: a session occupying 09:00-10:00 does not overlap one
//! starting at 10:00.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest schedulable minute of a day (09:00).
pub const DAY_START_MIN: u32 = 9 * 60;
/// Latest schedulable minute of a day (17:00, exclusive).
pub const DAY_END_MIN: u32 = 17 * 60;
/// Lunch gap start (12:00).
pub const LUNCH_START_MIN: u32 = 12 * 60;
/// Lunch gap end (13:00, exclusive).
pub const LUNCH_END_MIN: u32 = 13 * 60;

/// A weekday in the fixed Monday..Saturday teaching week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All teaching days in week order.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Zero-based position within the week.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at a zero-based week position.
    pub fn from_index(index: usize) -> Option<Day> {
        Day::ALL.get(index).copied()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        };
        f.write_str(name)
    }
}

/// A one-hour slot in the daily grid, identified by its start minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot start (minutes since midnight).
    pub start_min: u32,
}

impl TimeSlot {
    const fn at(start_min: u32) -> Self {
        Self { start_min }
    }

    /// Slot end (minutes since midnight, exclusive).
    #[inline]
    pub fn end_min(&self) -> u32 {
        self.start_min + 60
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_hhmm(self.start_min),
            format_hhmm(self.end_min())
        )
    }
}

/// The daily slot grid: 09:00, 10:00, 11:00, 13:00, 14:00, 15:00, 16:00.
///
/// The 12:00 slot is absent; slot index 2 (11:00) and index 3 (13:00) are
/// adjacent in the grid but not contiguous in wall-clock time.
pub const SLOTS: [TimeSlot; 7] = [
    TimeSlot::at(9 * 60),
    TimeSlot::at(10 * 60),
    TimeSlot::at(11 * 60),
    TimeSlot::at(13 * 60),
    TimeSlot::at(14 * 60),
    TimeSlot::at(15 * 60),
    TimeSlot::at(16 * 60),
];

/// Grid position of a slot start, if it is on the grid.
pub fn slot_index(start_min: u32) -> Option<usize> {
    SLOTS.iter().position(|s| s.start_min == start_min)
}

/// Whether two half-open minute intervals overlap.
///
/// Touching intervals (end1 == start2) do not overlap.
#[inline]
pub fn ranges_overlap(start1: u32, end1: u32, start2: u32, end2: u32) -> bool {
    start1 < end2 && start2 < end1
}

/// End minute of a block starting at `start_min` lasting `duration_hours`.
///
/// Purely arithmetic: a block placed at 11:00 for 2 hours ends at 13:00
/// even though that span crosses the lunch gap. Constraint evaluation is
/// responsible for penalizing such placements.
#[inline]
pub fn block_end_min(start_min: u32, duration_hours: u32) -> u32 {
    start_min + duration_hours * 60
}

/// Formats minutes since midnight as `HH:MM`.
pub fn format_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses an `HH:MM` string into minutes since midnight.
pub fn parse_hhmm(text: &str) -> Option<u32> {
    let (h, m) = text.split_once(':')?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}
