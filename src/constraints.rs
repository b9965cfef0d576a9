//! Constraint evaluation and fitness.
//!
//! Pure functions over a candidate week of sessions. Hard constraints are
//! counted per violation; soft constraints accumulate a weighted penalty.
//! Nothing here throws or allocates shared state, so the same functions
//! serve the genetic engine, the greedy path, and post-hoc reporting.
//!
//! # Fitness
//! `fitness = 1000 - 10 * hard_violations - soft_penalty`. A perfect week
//! (no hard violations, zero soft penalty) scores exactly 1000.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{
    ranges_overlap, Batch, Classroom, Day, Session, DAY_END_MIN, DAY_START_MIN, LUNCH_END_MIN,
    LUNCH_START_MIN,
};

/// Fitness of a week with no violations and no penalties.
pub const FITNESS_TARGET: f64 = 1000.0;
/// Fitness deduction per hard violation.
pub const HARD_VIOLATION_WEIGHT: f64 = 10.0;

const GAP_WEIGHT: f64 = 10.0;
const LOAD_WEIGHT: f64 = 5.0;
const AFTERNOON_THEORY_WEIGHT: f64 = 3.0;
const CONSECUTIVE_DAYS_WEIGHT: f64 = 2.0;

/// Gaps of three hours or more are free time, not fragmentation.
const GAP_PENALTY_CEILING_MIN: u32 = 180;

/// Per-constraint hard violation counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HardViolations {
    /// Same faculty in two overlapping sessions on one day.
    pub faculty_overlaps: u32,
    /// Same room hosting two overlapping sessions on one day.
    pub room_overlaps: u32,
    /// The batch itself attending two overlapping sessions.
    pub batch_overlaps: u32,
    /// Room smaller than the batch.
    pub capacity_violations: u32,
    /// Lab session outside a lab, or theory inside one.
    pub room_type_mismatches: u32,
    /// Session overlapping the 12:00-13:00 gap.
    pub lunch_overlaps: u32,
    /// Extra same-subject sessions beyond one per day.
    pub subject_per_day: u32,
    /// Session starting before 09:00 or ending after 17:00.
    pub outside_hours: u32,
    /// Sum over subjects of |scheduled hours - required hours|.
    pub missing_hours: u32,
}

impl HardViolations {
    /// Total violations across all nine checks.
    pub fn total(&self) -> u32 {
        self.faculty_overlaps
            + self.room_overlaps
            + self.batch_overlaps
            + self.capacity_violations
            + self.room_type_mismatches
            + self.lunch_overlaps
            + self.subject_per_day
            + self.outside_hours
            + self.missing_hours
    }
}

/// Soft constraint penalty components, unweighted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SoftPenalties {
    /// Idle hours between consecutive same-day sessions (gaps under 3h).
    pub gap_hours: f64,
    /// Standard deviation of per-day session counts.
    pub load_imbalance: f64,
    /// Non-lab sessions starting at or after 13:00.
    pub afternoon_theory: u32,
    /// Same-subject sessions on adjacent calendar days.
    pub consecutive_days: u32,
}

impl SoftPenalties {
    /// Weighted penalty total.
    pub fn total(&self) -> f64 {
        self.gap_hours * GAP_WEIGHT
            + self.load_imbalance * LOAD_WEIGHT
            + f64::from(self.afternoon_theory) * AFTERNOON_THEORY_WEIGHT
            + f64::from(self.consecutive_days) * CONSECUTIVE_DAYS_WEIGHT
    }
}

/// Full evaluation of one candidate week.
///
/// Recomputed on demand; never stored as authoritative state.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintReport {
    /// Hard violation counts.
    pub hard: HardViolations,
    /// Soft penalty components.
    pub soft: SoftPenalties,
    /// Overall fitness.
    pub fitness: f64,
}

/// Counts pairwise overlaps within groups keyed by `key_of`.
fn count_grouped_overlaps<K, F>(sessions: &[Session], key_of: F) -> u32
where
    K: std::hash::Hash + Eq,
    F: Fn(&Session) -> K,
{
    let mut groups: HashMap<K, Vec<(u32, u32)>> = HashMap::new();
    for session in sessions {
        groups
            .entry(key_of(session))
            .or_default()
            .push((session.start_min, session.end_min()));
    }

    let mut violations = 0;
    for intervals in groups.values() {
        for i in 0..intervals.len() {
            for j in (i + 1)..intervals.len() {
                let (s1, e1) = intervals[i];
                let (s2, e2) = intervals[j];
                if ranges_overlap(s1, e1, s2, e2) {
                    violations += 1;
                }
            }
        }
    }
    violations
}

fn count_faculty_overlaps(sessions: &[Session]) -> u32 {
    count_grouped_overlaps(sessions, |s| (s.faculty_id.clone(), s.day))
}

fn count_room_overlaps(sessions: &[Session]) -> u32 {
    count_grouped_overlaps(sessions, |s| (s.room_id.clone(), s.day))
}

fn count_batch_overlaps(sessions: &[Session]) -> u32 {
    // Every session in the week belongs to the one batch being scheduled
    count_grouped_overlaps(sessions, |s| s.day)
}

fn count_capacity_violations(
    sessions: &[Session],
    strength: u32,
    rooms: &HashMap<&str, &Classroom>,
) -> u32 {
    sessions
        .iter()
        .filter(|s| {
            rooms
                .get(s.room_id.as_str())
                .is_some_and(|room| room.capacity < strength)
        })
        .count() as u32
}

fn count_room_type_mismatches(sessions: &[Session], rooms: &HashMap<&str, &Classroom>) -> u32 {
    sessions
        .iter()
        .filter(|s| {
            rooms
                .get(s.room_id.as_str())
                .is_some_and(|room| !room.suits(s.session_type))
        })
        .count() as u32
}

fn count_lunch_overlaps(sessions: &[Session]) -> u32 {
    sessions
        .iter()
        .filter(|s| ranges_overlap(s.start_min, s.end_min(), LUNCH_START_MIN, LUNCH_END_MIN))
        .count() as u32
}

fn count_subject_per_day(sessions: &[Session]) -> u32 {
    let mut per_day: HashMap<(&str, Day), u32> = HashMap::new();
    for session in sessions {
        *per_day
            .entry((session.subject_id.as_str(), session.day))
            .or_insert(0) += 1;
    }
    per_day.values().map(|&count| count.saturating_sub(1)).sum()
}

fn count_outside_hours(sessions: &[Session]) -> u32 {
    sessions
        .iter()
        .filter(|s| s.start_min < DAY_START_MIN || s.end_min() > DAY_END_MIN)
        .count() as u32
}

fn count_missing_hours(sessions: &[Session], batch: &Batch) -> u32 {
    let mut scheduled: HashMap<&str, u32> = HashMap::new();
    for session in sessions {
        *scheduled.entry(session.subject_id.as_str()).or_insert(0) += session.duration_hours;
    }

    batch
        .subjects
        .iter()
        .map(|req| {
            let hours = scheduled.get(req.subject_id.as_str()).copied().unwrap_or(0);
            hours.abs_diff(req.weekly_hours)
        })
        .sum()
}

fn gap_hours(sessions: &[Session]) -> f64 {
    let mut total = 0.0;

    for day in Day::ALL {
        let mut day_sessions: Vec<&Session> =
            sessions.iter().filter(|s| s.day == day).collect();
        if day_sessions.len() < 2 {
            continue;
        }
        day_sessions.sort_by_key(|s| s.start_min);

        for pair in day_sessions.windows(2) {
            let current_end = pair[0].end_min();
            let next_start = pair[1].start_min;
            if next_start > current_end {
                let gap = next_start - current_end;
                if gap < GAP_PENALTY_CEILING_MIN {
                    total += f64::from(gap) / 60.0;
                }
            }
        }
    }

    total
}

fn load_imbalance(sessions: &[Session]) -> f64 {
    let mut counts = [0u32; 6];
    for session in sessions {
        counts[session.day.index()] += 1;
    }

    let n = counts.len() as f64;
    let mean = counts.iter().map(|&c| f64::from(c)).sum::<f64>() / n;
    let variance = counts
        .iter()
        .map(|&c| (f64::from(c) - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}

fn count_afternoon_theory(sessions: &[Session]) -> u32 {
    sessions
        .iter()
        .filter(|s| !s.session_type.is_lab() && s.start_min >= LUNCH_END_MIN)
        .count() as u32
}

fn count_consecutive_days(sessions: &[Session]) -> u32 {
    let mut subject_days: HashMap<&str, Vec<usize>> = HashMap::new();
    for session in sessions {
        subject_days
            .entry(session.subject_id.as_str())
            .or_default()
            .push(session.day.index());
    }

    let mut count = 0;
    for days in subject_days.values_mut() {
        days.sort_unstable();
        count += days.windows(2).filter(|w| w[1] - w[0] == 1).count() as u32;
    }
    count
}

fn room_map<'a>(rooms: &'a [Classroom]) -> HashMap<&'a str, &'a Classroom> {
    rooms.iter().map(|r| (r.id.as_str(), r)).collect()
}

/// Counts every hard violation in a candidate week.
pub fn hard_violations(sessions: &[Session], batch: &Batch, rooms: &[Classroom]) -> HardViolations {
    let by_id = room_map(rooms);
    HardViolations {
        faculty_overlaps: count_faculty_overlaps(sessions),
        room_overlaps: count_room_overlaps(sessions),
        batch_overlaps: count_batch_overlaps(sessions),
        capacity_violations: count_capacity_violations(sessions, batch.strength, &by_id),
        room_type_mismatches: count_room_type_mismatches(sessions, &by_id),
        lunch_overlaps: count_lunch_overlaps(sessions),
        subject_per_day: count_subject_per_day(sessions),
        outside_hours: count_outside_hours(sessions),
        missing_hours: count_missing_hours(sessions, batch),
    }
}

/// Computes the soft penalty components of a candidate week.
pub fn soft_penalties(sessions: &[Session]) -> SoftPenalties {
    SoftPenalties {
        gap_hours: gap_hours(sessions),
        load_imbalance: load_imbalance(sessions),
        afternoon_theory: count_afternoon_theory(sessions),
        consecutive_days: count_consecutive_days(sessions),
    }
}

/// 1 when every hard constraint is satisfied, otherwise 0.
pub fn hard_score(sessions: &[Session], batch: &Batch, rooms: &[Classroom]) -> u32 {
    u32::from(hard_violations(sessions, batch, rooms).total() == 0)
}

/// Overall fitness of a candidate week. Higher is better; 1000 is perfect.
pub fn fitness(sessions: &[Session], batch: &Batch, rooms: &[Classroom]) -> f64 {
    let hard = hard_violations(sessions, batch, rooms);
    let soft = soft_penalties(sessions);
    FITNESS_TARGET - f64::from(hard.total()) * HARD_VIOLATION_WEIGHT - soft.total()
}

/// Full constraint report for a candidate week.
pub fn report(sessions: &[Session], batch: &Batch, rooms: &[Classroom]) -> ConstraintReport {
    let hard = hard_violations(sessions, batch, rooms);
    let soft = soft_penalties(sessions);
    let fitness = FITNESS_TARGET - f64::from(hard.total()) * HARD_VIOLATION_WEIGHT - soft.total();
    ConstraintReport {
        hard,
        soft,
        fitness,
    }
}
