//! Placed sessions and committed schedules.
//!
//! A [`Session`] is a single placed teaching block, the atomic unit both
//! generation paths emit and the gene the genetic encoding is built from.
//! A [`BatchSchedule`] is another batch's already-generated week together
//! with its lifecycle status; committed ones feed the availability index.

use serde::{Deserialize, Serialize};

use super::{block_end_min, Day, SessionType};

/// A single placed teaching block.
///
/// End time is derived from start and duration. Sessions are owned values;
/// cloning a session (or any collection of them) copies it outright, so
/// population members never alias each other's genes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Day of week.
    pub day: Day,
    /// Start (minutes since midnight).
    pub start_min: u32,
    /// Length in whole hours (>= 1).
    pub duration_hours: u32,
    /// Subject taught.
    pub subject_id: String,
    /// Faculty member teaching.
    pub faculty_id: String,
    /// Room the session occupies.
    pub room_id: String,
    /// Session kind (copied from the requirement).
    pub session_type: SessionType,
}

impl Session {
    /// End (minutes since midnight, exclusive).
    #[inline]
    pub fn end_min(&self) -> u32 {
        block_end_min(self.start_min, self.duration_hours)
    }

    /// Hourly slot starts this session covers, in order.
    ///
    /// Derived arithmetically from the start; a block that was (invalidly)
    /// placed across the lunch gap still reports each clock hour it spans.
    pub fn covered_slot_starts(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.duration_hours).map(|k| self.start_min + k * 60)
    }
}

/// Orders sessions by day then start time, in place.
pub fn sort_week(sessions: &mut [Session]) {
    sessions.sort_by_key(|s| (s.day, s.start_min));
}

/// Lifecycle status of a generated timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Generated but not yet reviewed.
    Draft,
    /// In force for its batch.
    Active,
    /// In force and visible to students.
    Published,
    /// Reviewed and declined.
    Rejected,
}

impl ScheduleStatus {
    /// Whether schedules with this status block resources for other runs.
    #[inline]
    pub fn is_committed(self) -> bool {
        matches!(self, ScheduleStatus::Active | ScheduleStatus::Published)
    }
}

/// Another batch's generated week, as stored by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSchedule {
    /// Batch the schedule belongs to.
    pub batch_id: String,
    /// Lifecycle status.
    pub status: ScheduleStatus,
    /// The placed sessions.
    pub week_slots: Vec<Session>,
}

impl BatchSchedule {
    /// Creates a schedule record.
    pub fn new(batch_id: impl Into<String>, status: ScheduleStatus, week_slots: Vec<Session>) -> Self {
        Self {
            batch_id: batch_id.into(),
            status,
            week_slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(day: Day, start_min: u32, duration_hours: u32) -> Session {
        Session {
            day,
            start_min,
            duration_hours,
            subject_id: "S1".into(),
            faculty_id: "F1".into(),
            room_id: "R1".into(),
            session_type: SessionType::Lecture,
        }
    }

    #[test]
    fn test_end_min_derived() {
        let s = session(Day::Monday, 9 * 60, 2);
        assert_eq!(s.end_min(), 11 * 60);
    }

    #[test]
    fn test_covered_slot_starts() {
        let s = session(Day::Tuesday, 13 * 60, 2);
        let covered: Vec<u32> = s.covered_slot_starts().collect();
        assert_eq!(covered, vec![13 * 60, 14 * 60]);
    }

    #[test]
    fn test_sort_week() {
        let mut week = vec![
            session(Day::Wednesday, 9 * 60, 1),
            session(Day::Monday, 14 * 60, 1),
            session(Day::Monday, 9 * 60, 1),
        ];
        sort_week(&mut week);
        assert_eq!(week[0].day, Day::Monday);
        assert_eq!(week[0].start_min, 9 * 60);
        assert_eq!(week[1].start_min, 14 * 60);
        assert_eq!(week[2].day, Day::Wednesday);
    }

    #[test]
    fn test_status_committed() {
        assert!(ScheduleStatus::Active.is_committed());
        assert!(ScheduleStatus::Published.is_committed());
        assert!(!ScheduleStatus::Draft.is_committed());
        assert!(!ScheduleStatus::Rejected.is_committed());
    }

    #[test]
    fn test_session_serde_round_trip() {
        let s = session(Day::Friday, 10 * 60, 1);
        let json = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
