//! Global availability index.
//!
//! A read-only snapshot of which (faculty, slot) and (room, slot) pairs
//! are already consumed by other batches' committed schedules. Built once
//! at the start of a scheduling run and never refreshed, so a run is
//! isolated from concurrent runs except through that one-time read.
//!
//! Only schedules whose status is committed (active or published)
//! contribute; drafts and rejected schedules do not block resources.

use std::collections::HashSet;

use crate::models::{BatchSchedule, Day};

/// Occupied (faculty, day, slot-start) and (room, day, slot-start) keys.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    faculty_busy: HashSet<(String, Day, u32)>,
    room_busy: HashSet<(String, Day, u32)>,
}

impl AvailabilityIndex {
    /// Creates an empty index (nothing occupied).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the index from all other batches' stored schedules.
    ///
    /// Non-committed schedules are skipped. Multi-hour sessions occupy
    /// every hourly slot start they cover, so a committed 2-hour lab
    /// blocks both of its hours for everyone else.
    pub fn from_schedules(schedules: &[BatchSchedule]) -> Self {
        let mut index = Self::default();

        for schedule in schedules {
            if !schedule.status.is_committed() {
                continue;
            }
            for session in &schedule.week_slots {
                for slot_start in session.covered_slot_starts() {
                    index
                        .faculty_busy
                        .insert((session.faculty_id.clone(), session.day, slot_start));
                    index
                        .room_busy
                        .insert((session.room_id.clone(), session.day, slot_start));
                }
            }
        }

        index
    }

    /// Whether a faculty member is committed elsewhere at a slot.
    pub fn is_faculty_busy(&self, faculty_id: &str, day: Day, slot_start: u32) -> bool {
        self.faculty_busy
            .contains(&(faculty_id.to_string(), day, slot_start))
    }

    /// Whether a room is committed elsewhere at a slot.
    pub fn is_room_busy(&self, room_id: &str, day: Day, slot_start: u32) -> bool {
        self.room_busy
            .contains(&(room_id.to_string(), day, slot_start))
    }

    /// Number of occupied (resource, slot) keys, faculty plus rooms.
    pub fn occupied_count(&self) -> usize {
        self.faculty_busy.len() + self.room_busy.len()
    }
}
