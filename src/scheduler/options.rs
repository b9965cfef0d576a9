//! Generation entry points and advisory suggestions.
//!
//! [`generate_options`] is the wrapper callers persist from: it runs the
//! genetic engine and returns exactly one named option today, with the
//! validator-derived conflict count alongside. [`generate_timetable`] is
//! the greedy alternative, which consults the committed schedules of
//! other batches through a freshly built availability index.

use log::info;
use rand::Rng;
use serde::Serialize;

use super::GreedyScheduler;
use crate::availability::AvailabilityIndex;
use crate::blocks::BlockPolicy;
use crate::constraints::ConstraintReport;
use crate::ga::{evolve, GaConfig};
use crate::models::{Batch, BatchSchedule, Classroom, Session};
use crate::validation::validate_week;

/// Weekly teaching hours above which a faculty member is flagged.
const HIGH_FACULTY_LOAD_HOURS: u32 = 20;

/// One named schedule candidate offered to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TimetableOption {
    /// Option number, starting at 1.
    pub option: u32,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// The placed sessions, ordered by day and start time.
    pub week_slots: Vec<Session>,
    /// Faculty overlap count from the independent week validator,
    /// recorded alongside the schedule when persisted.
    pub conflict_count: u32,
    /// Constraint report of the underlying encoding.
    pub report: ConstraintReport,
}

/// Generates schedule options for a batch via the genetic engine.
///
/// Returns exactly one option. The validator cross-checks the result
/// independently of the engine's own fitness number; its faculty overlap
/// count is reported even when fitness claims a clean solution.
pub fn generate_options<R: Rng>(
    batch: &Batch,
    rooms: &[Classroom],
    config: &GaConfig,
    policy: &BlockPolicy,
    rng: &mut R,
) -> Vec<TimetableOption> {
    info!("generating timetable options for batch {}", batch.id);

    let outcome = evolve(batch, rooms, policy, config, rng);
    let week_slots = outcome.best.week();
    let validation = validate_week(&week_slots);

    vec![TimetableOption {
        option: 1,
        name: "Optimized Schedule (Genetic Algorithm)".to_string(),
        description: "Conflict-free schedule with balanced load and minimized gaps.".to_string(),
        week_slots,
        conflict_count: validation.conflicts.faculty_overlaps.len() as u32,
        report: outcome.report,
    }]
}

/// Generates a single week via the greedy heuristic.
///
/// Builds the availability index from the committed schedules of other
/// batches, then places first-fit against it.
pub fn generate_timetable(
    batch: &Batch,
    rooms: &[Classroom],
    committed: &[BatchSchedule],
    policy: &BlockPolicy,
) -> Vec<Session> {
    let availability = AvailabilityIndex::from_schedules(committed);
    GreedyScheduler::new()
        .with_policy(*policy)
        .schedule(batch, rooms, &availability)
}

/// Advisory notes for a batch's requirements.
///
/// Pure function over the batch; does not inspect any generated week.
pub fn generate_suggestions(batch: &Batch) -> Vec<String> {
    let mut suggestions = Vec::new();

    let electives = batch.subjects.iter().filter(|s| s.is_elective).count();
    if electives > 0 {
        suggestions.push(format!(
            "Consider scheduling {electives} elective(s) in non-overlapping slots for student flexibility."
        ));
    }

    let mut loads: Vec<(&str, u32)> = Vec::new();
    for requirement in &batch.subjects {
        match loads
            .iter_mut()
            .find(|(faculty, _)| *faculty == requirement.faculty_id)
        {
            Some((_, hours)) => *hours += requirement.weekly_hours,
            None => loads.push((&requirement.faculty_id, requirement.weekly_hours)),
        }
    }
    for (faculty, hours) in loads {
        if hours > HIGH_FACULTY_LOAD_HOURS {
            suggestions.push(format!(
                "Faculty {faculty} has a high workload ({hours} hrs/week). Consider load balancing."
            ));
        }
    }

    let labs = batch
        .subjects
        .iter()
        .filter(|s| s.session_type.is_lab())
        .count();
    if labs > 0 {
        suggestions.push(format!(
            "Schedule {labs} lab session(s) in consecutive slots with adequate lab infrastructure."
        ));
    }

    let practicals = batch
        .subjects
        .iter()
        .filter(|s| s.session_type == crate::models::SessionType::Practical)
        .count();
    if practicals > 0 {
        suggestions.push(format!(
            "Reserve dedicated time slots for {practicals} practical session(s)."
        ));
    }

    suggestions
}
