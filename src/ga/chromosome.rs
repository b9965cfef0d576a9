//! Timetable chromosome.
//!
//! # Encoding
//!
//! A chromosome is a flat list of placed sessions (genes), one gene per
//! block of a subject's weekly hours, plus a cached fitness value. Genes
//! are owned values; cloning a chromosome deep-copies every session, so
//! genetic operators never alias genes across population members.
//!
//! Higher fitness = better schedule (maximization convention; 1000 is a
//! perfect week).

use std::collections::HashSet;

use log::warn;
use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::blocks::BlockPolicy;
use crate::constraints::{self, ConstraintReport};
use crate::models::{room_pool, sort_week, Batch, Classroom, Day, Session, SLOTS};

/// Random placement draws per block before giving up and keeping the
/// last draw as-is. Violations introduced that way are corrected by
/// fitness pressure, not rejected at construction.
const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// A candidate weekly schedule for one batch.
#[derive(Debug, Clone)]
pub struct Chromosome {
    /// Placed sessions, one per block.
    pub genes: Vec<Session>,
    /// Cached fitness; `NEG_INFINITY` until evaluated.
    pub fitness: f64,
}

impl Chromosome {
    /// Wraps an existing gene list, fitness unevaluated.
    pub fn new(genes: Vec<Session>) -> Self {
        Self {
            genes,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Creates a random chromosome for a batch.
    ///
    /// Each requirement is split into blocks by the policy, and each
    /// block is placed by rejection sampling over (day, slot, room)
    /// draws: a draw colliding with a (day, slot, room) triple already
    /// used inside this same chromosome is retried, and after
    /// [`MAX_PLACEMENT_ATTEMPTS`] failures the last draw is kept even
    /// though it collides or overflows the grid.
    ///
    /// Requirements whose type-filtered room pool is empty contribute no
    /// genes; the missing hours surface as a hard-constraint violation.
    pub fn random<R: Rng>(
        batch: &Batch,
        rooms: &[Classroom],
        policy: &BlockPolicy,
        rng: &mut R,
    ) -> Self {
        let mut genes = Vec::new();
        let mut used: HashSet<(Day, u32, String)> = HashSet::new();

        for requirement in &batch.subjects {
            let pool = room_pool(rooms, requirement.session_type);
            if pool.is_empty() {
                warn!(
                    "no {:?} rooms available for subject {}",
                    requirement.session_type, requirement.subject_id
                );
                continue;
            }

            for duration in policy.block_durations(requirement) {
                let mut placement = None;
                let mut last_draw = (Day::Monday, 0usize, pool[0].id.clone());

                for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                    let day = *Day::ALL.choose(rng).expect("week is non-empty");
                    let slot_idx = rng.random_range(0..SLOTS.len());
                    let room = pool.choose(rng).expect("pool checked non-empty");
                    last_draw = (day, slot_idx, room.id.clone());

                    if slot_idx + duration as usize > SLOTS.len() {
                        continue;
                    }
                    let collides = (0..duration as usize).any(|k| {
                        used.contains(&(day, SLOTS[slot_idx + k].start_min, room.id.clone()))
                    });
                    if collides {
                        continue;
                    }

                    for k in 0..duration as usize {
                        used.insert((day, SLOTS[slot_idx + k].start_min, room.id.clone()));
                    }
                    placement = Some(last_draw.clone());
                    break;
                }

                let (day, slot_idx, room_id) = placement.unwrap_or(last_draw);
                genes.push(Session {
                    day,
                    start_min: SLOTS[slot_idx].start_min,
                    duration_hours: duration,
                    subject_id: requirement.subject_id.clone(),
                    faculty_id: requirement.faculty_id.clone(),
                    room_id,
                    session_type: requirement.session_type,
                });
            }
        }

        Self::new(genes)
    }

    /// Evaluates and caches this chromosome's fitness.
    pub fn evaluate(&mut self, batch: &Batch, rooms: &[Classroom]) -> f64 {
        self.fitness = constraints::fitness(&self.genes, batch, rooms);
        self.fitness
    }

    /// Detailed constraint report for this chromosome.
    pub fn report(&self, batch: &Batch, rooms: &[Classroom]) -> ConstraintReport {
        constraints::report(&self.genes, batch, rooms)
    }

    /// The genes as a week, ordered by day then start time.
    pub fn week(&self) -> Vec<Session> {
        let mut week = self.genes.clone();
        sort_week(&mut week);
        week
    }
}
