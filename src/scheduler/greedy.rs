//! Greedy heuristic scheduler.
//!
//! # Algorithm
//!
//! 1. Sort requirements descending by (largest block duration, weekly
//!    hours): big lab blocks fragment the week fastest, so they go first.
//! 2. Split each requirement into blocks via the shared policy.
//! 3. For each block, scan days then slots in fixed order and place at
//!    the first (day, slot, room) where the faculty and a type-matching,
//!    large-enough room are free in both the global availability index
//!    and this run's own placements. Rooms are scanned smallest first so
//!    big halls stay free for big batches. A day already holding a block
//!    of the same subject is skipped, and a block may not span the lunch
//!    gap.
//! 4. An unplaceable block aborts its subject (logged, not fatal); the
//!    shortfall surfaces through the missing-hours constraint and the
//!    week validator.
//!
//! Deterministic for a given input ordering; no randomness involved.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::availability::AvailabilityIndex;
use crate::blocks::BlockPolicy;
use crate::models::{sort_week, Batch, Classroom, Day, Session, SubjectRequirement, SLOTS};

/// Index of the last slot before the lunch gap (11:00).
const LAST_MORNING_SLOT: usize = 2;

/// Fast non-evolutionary placement strategy.
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    policy: BlockPolicy,
}

impl GreedyScheduler {
    /// Creates a scheduler with the default block policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the block splitting policy.
    pub fn with_policy(mut self, policy: BlockPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Places a week of sessions for a batch.
    ///
    /// Returns the placed sessions sorted by (day, start time). Subjects
    /// that could not be fully placed are simply short of hours; the
    /// caller detects that through the constraint report or validator.
    pub fn schedule(
        &self,
        batch: &Batch,
        rooms: &[Classroom],
        availability: &AvailabilityIndex,
    ) -> Vec<Session> {
        // Smallest adequate room first
        let mut rooms_by_capacity: Vec<&Classroom> = rooms.iter().collect();
        rooms_by_capacity.sort_by_key(|r| r.capacity);

        let mut ordered: Vec<&SubjectRequirement> = batch.subjects.iter().collect();
        ordered.sort_by(|a, b| {
            let key_a = (self.policy.largest_block(a), a.weekly_hours);
            let key_b = (self.policy.largest_block(b), b.weekly_hours);
            key_b.cmp(&key_a)
        });

        let mut placements = WorkingPlacements::default();
        let mut week = Vec::new();

        for requirement in ordered {
            debug!(
                "placing {} ({}h {:?})",
                requirement.subject_id, requirement.weekly_hours, requirement.session_type
            );

            let pool: Vec<&Classroom> = rooms_by_capacity
                .iter()
                .copied()
                .filter(|r| r.suits(requirement.session_type))
                .collect();
            if pool.is_empty() {
                warn!(
                    "no {:?} rooms available for subject {}; skipping",
                    requirement.session_type, requirement.subject_id
                );
                continue;
            }

            for duration in self.policy.block_durations(requirement) {
                match self.place_block(batch, requirement, duration, &pool, availability, &mut placements)
                {
                    Some(session) => week.push(session),
                    None => {
                        warn!(
                            "unable to place a {duration}-hour block of {}; aborting subject",
                            requirement.subject_id
                        );
                        break;
                    }
                }
            }
        }

        sort_week(&mut week);
        week
    }

    /// First-fit scan over days, slots, and rooms for one block.
    fn place_block(
        &self,
        batch: &Batch,
        requirement: &SubjectRequirement,
        duration: u32,
        pool: &[&Classroom],
        availability: &AvailabilityIndex,
        placements: &mut WorkingPlacements,
    ) -> Option<Session> {
        for day in Day::ALL {
            if placements.subject_blocks(&requirement.subject_id, day) >= 1 {
                continue;
            }

            for start_idx in 0..SLOTS.len() {
                if start_idx + duration as usize > SLOTS.len() {
                    break;
                }
                // A morning start must not extend past the lunch gap
                if start_idx <= LAST_MORNING_SLOT
                    && start_idx + duration as usize > LAST_MORNING_SLOT + 1
                {
                    continue;
                }

                let faculty_free = (0..duration as usize).all(|k| {
                    let slot = SLOTS[start_idx + k].start_min;
                    !availability.is_faculty_busy(&requirement.faculty_id, day, slot)
                        && !placements.is_faculty_busy(&requirement.faculty_id, day, slot)
                });
                if !faculty_free {
                    continue;
                }

                let room = pool.iter().find(|room| {
                    room.capacity >= batch.strength
                        && (0..duration as usize).all(|k| {
                            let slot = SLOTS[start_idx + k].start_min;
                            !availability.is_room_busy(&room.id, day, slot)
                                && !placements.is_room_busy(&room.id, day, slot)
                        })
                });

                if let Some(room) = room {
                    for k in 0..duration as usize {
                        let slot = SLOTS[start_idx + k].start_min;
                        placements.occupy(&requirement.faculty_id, &room.id, day, slot);
                    }
                    placements.record_subject_block(&requirement.subject_id, day);

                    debug!(
                        "placed {} on {day} slot {start_idx} ({duration}h) in {}",
                        requirement.subject_id, room.id
                    );
                    return Some(Session {
                        day,
                        start_min: SLOTS[start_idx].start_min,
                        duration_hours: duration,
                        subject_id: requirement.subject_id.clone(),
                        faculty_id: requirement.faculty_id.clone(),
                        room_id: room.id.clone(),
                        session_type: requirement.session_type,
                    });
                }
            }
        }

        None
    }
}

/// This run's own in-progress occupancy, separate from the read-only
/// global index.
#[derive(Debug, Default)]
struct WorkingPlacements {
    faculty: HashSet<(String, Day, u32)>,
    rooms: HashSet<(String, Day, u32)>,
    subject_daily: HashMap<(String, Day), u32>,
}

impl WorkingPlacements {
    fn is_faculty_busy(&self, faculty_id: &str, day: Day, slot_start: u32) -> bool {
        self.faculty
            .contains(&(faculty_id.to_string(), day, slot_start))
    }

    fn is_room_busy(&self, room_id: &str, day: Day, slot_start: u32) -> bool {
        self.rooms.contains(&(room_id.to_string(), day, slot_start))
    }

    fn occupy(&mut self, faculty_id: &str, room_id: &str, day: Day, slot_start: u32) {
        self.faculty
            .insert((faculty_id.to_string(), day, slot_start));
        self.rooms.insert((room_id.to_string(), day, slot_start));
    }

    fn subject_blocks(&self, subject_id: &str, day: Day) -> u32 {
        self.subject_daily
            .get(&(subject_id.to_string(), day))
            .copied()
            .unwrap_or(0)
    }

    fn record_subject_block(&mut self, subject_id: &str, day: Day) {
        *self
            .subject_daily
            .entry((subject_id.to_string(), day))
            .or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatchSchedule, ScheduleStatus, SessionType, SubjectRequirement};
    use crate::validation::validate_week;

    fn rooms() -> Vec<Classroom> {
        vec![
            Classroom::lecture("LH-1", 60),
            Classroom::lecture("LH-2", 120),
            Classroom::lab("LAB-1", 40),
        ]
    }

    #[test]
    fn test_feasible_batch_places_all_hours() {
        let batch = Batch::new("B1", 30)
            .with_subject(SubjectRequirement::new("MATH", "F1", 4, SessionType::Lecture))
            .with_subject(SubjectRequirement::new("PHY", "F2", 3, SessionType::Lecture))
            .with_subject(SubjectRequirement::new("OS-LAB", "F3", 3, SessionType::Lab));
        let rooms = rooms();

        let week = GreedyScheduler::new().schedule(&batch, &rooms, &AvailabilityIndex::empty());

        let total: u32 = week.iter().map(|s| s.duration_hours).sum();
        assert_eq!(total, 10);

        let validation = validate_week(&week);
        assert!(validation.is_valid, "conflicts: {:?}", validation.conflicts);
    }

    #[test]
    fn test_lab_block_split() {
        // One 3-hour lab for 30 students with a capacity-40 lab room:
        // expect a 2-hour block plus a 1-hour block
        let batch = Batch::new("B1", 30)
            .with_subject(SubjectRequirement::new("OS-LAB", "F1", 3, SessionType::Lab));
        let rooms = vec![Classroom::lab("LAB-1", 40)];

        let week = GreedyScheduler::new().schedule(&batch, &rooms, &AvailabilityIndex::empty());

        assert_eq!(week.len(), 2);
        let mut durations: Vec<u32> = week.iter().map(|s| s.duration_hours).collect();
        durations.sort_unstable();
        assert_eq!(durations, vec![1, 2]);
        assert!(week.iter().all(|s| s.room_id == "LAB-1"));
    }

    #[test]
    fn test_infeasible_hours_omitted_without_error() {
        // 50 required hours cannot fit into 42 slot-hours of one room
        let batch = Batch::new("B1", 30)
            .with_subject(SubjectRequirement::new("S1", "F1", 25, SessionType::Lecture))
            .with_subject(SubjectRequirement::new("S2", "F2", 25, SessionType::Lecture));
        let rooms = vec![Classroom::lecture("LH-1", 60)];

        let week = GreedyScheduler::new().schedule(&batch, &rooms, &AvailabilityIndex::empty());
        let total: u32 = week.iter().map(|s| s.duration_hours).sum();
        assert!(total < 50);
    }

    #[test]
    fn test_max_one_block_per_subject_per_day() {
        let batch = Batch::new("B1", 30)
            .with_subject(SubjectRequirement::new("MATH", "F1", 6, SessionType::Lecture));
        let rooms = rooms();

        let week = GreedyScheduler::new().schedule(&batch, &rooms, &AvailabilityIndex::empty());

        let mut per_day: HashMap<Day, u32> = HashMap::new();
        for session in &week {
            *per_day.entry(session.day).or_insert(0) += 1;
        }
        assert!(per_day.values().all(|&count| count <= 1));
        assert_eq!(week.len(), 6);
    }

    #[test]
    fn test_no_block_spans_lunch() {
        // Force many 2-hour lab blocks; none may cross 12:00-13:00
        let batch = Batch::new("B1", 30)
            .with_subject(SubjectRequirement::new("L1", "F1", 4, SessionType::Lab))
            .with_subject(SubjectRequirement::new("L2", "F2", 4, SessionType::Lab));
        let rooms = vec![Classroom::lab("LAB-1", 40)];

        let week = GreedyScheduler::new().schedule(&batch, &rooms, &AvailabilityIndex::empty());
        for session in &week {
            assert!(
                session.end_min() <= 12 * 60 || session.start_min >= 13 * 60,
                "session crosses lunch: {session:?}"
            );
        }
    }

    #[test]
    fn test_committed_schedules_respected() {
        let batch = Batch::new("B1", 30)
            .with_subject(SubjectRequirement::new("MATH", "F1", 1, SessionType::Lecture));
        let rooms = vec![Classroom::lecture("LH-1", 60)];

        // F1 already teaches another batch Monday 09:00
        let committed = vec![BatchSchedule::new(
            "other",
            ScheduleStatus::Active,
            vec![Session {
                day: Day::Monday,
                start_min: 9 * 60,
                duration_hours: 1,
                subject_id: "X".into(),
                faculty_id: "F1".into(),
                room_id: "ELSEWHERE".into(),
                session_type: SessionType::Lecture,
            }],
        )];
        let availability = AvailabilityIndex::from_schedules(&committed);

        let week = GreedyScheduler::new().schedule(&batch, &rooms, &availability);
        assert_eq!(week.len(), 1);
        // First free scan position is Monday 10:00
        assert_eq!(week[0].day, Day::Monday);
        assert_eq!(week[0].start_min, 10 * 60);
    }

    #[test]
    fn test_prefers_smallest_adequate_room() {
        let batch = Batch::new("B1", 100)
            .with_subject(SubjectRequirement::new("MATH", "F1", 1, SessionType::Lecture));
        let rooms = rooms(); // LH-1 seats 60, LH-2 seats 120

        let week = GreedyScheduler::new().schedule(&batch, &rooms, &AvailabilityIndex::empty());
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].room_id, "LH-2");
    }

    #[test]
    fn test_too_small_rooms_skip_subject() {
        let batch = Batch::new("B1", 200)
            .with_subject(SubjectRequirement::new("MATH", "F1", 2, SessionType::Lecture));
        let rooms = rooms();

        let week = GreedyScheduler::new().schedule(&batch, &rooms, &AvailabilityIndex::empty());
        assert!(week.is_empty());
    }

    #[test]
    fn test_output_sorted_by_day_and_time() {
        let batch = Batch::new("B1", 30)
            .with_subject(SubjectRequirement::new("A", "F1", 3, SessionType::Lecture))
            .with_subject(SubjectRequirement::new("B", "F2", 3, SessionType::Lecture))
            .with_subject(SubjectRequirement::new("C", "F3", 3, SessionType::Lecture));
        let rooms = rooms();

        let week = GreedyScheduler::new().schedule(&batch, &rooms, &AvailabilityIndex::empty());
        assert!(week
            .windows(2)
            .all(|w| (w[0].day, w[0].start_min) <= (w[1].day, w[1].start_min)));
    }
}
