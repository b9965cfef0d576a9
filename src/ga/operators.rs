//! Genetic operators: crossover and mutation.
//!
//! Crossover is single-point over the flat gene list followed by a
//! repair step that restores each child's per-subject session counts to
//! its reference parent's, so recombination never loses or duplicates a
//! subject's hours. Mutation perturbs placement only (day, time, or
//! room); it never touches subject, faculty, or duration, and never
//! repairs the conflicts it may introduce. Fitness pressure does that.

use std::collections::{HashMap, HashSet};

use rand::prelude::IndexedRandom;
use rand::Rng;

use super::Chromosome;
use crate::models::{room_pool, Classroom, Day, Session, SLOTS};

/// What a single mutation changes about a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MutationKind {
    /// Reassign a random day.
    Day,
    /// Reassign a random grid slot.
    Time,
    /// Reassign a random type-appropriate room.
    Room,
}

const MUTATION_KINDS: [MutationKind; 3] =
    [MutationKind::Day, MutationKind::Time, MutationKind::Room];

/// Single-point crossover with per-subject repair.
///
/// Child A takes parent 1's genes before a random split point and parent
/// 2's after; child B is the complement. Each child is then repaired
/// against its leading parent. Parents with fewer than two genes between
/// them are returned as clones.
pub fn crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let min_len = parent1.genes.len().min(parent2.genes.len());
    if min_len < 2 {
        return (parent1.clone(), parent2.clone());
    }

    let point = rng.random_range(1..min_len);

    let child1_genes: Vec<Session> = parent1.genes[..point]
        .iter()
        .chain(&parent2.genes[point..])
        .cloned()
        .collect();
    let child2_genes: Vec<Session> = parent2.genes[..point]
        .iter()
        .chain(&parent1.genes[point..])
        .cloned()
        .collect();

    (
        Chromosome::new(repair(child1_genes, &parent1.genes)),
        Chromosome::new(repair(child2_genes, &parent2.genes)),
    )
}

/// Restores per-subject session counts to the reference parent's.
///
/// Excess sessions of a subject are dropped from the end of the gene
/// list; missing ones are appended as copies of the reference parent's
/// genes for that subject.
fn repair(genes: Vec<Session>, reference: &[Session]) -> Vec<Session> {
    let mut reference_counts: HashMap<&str, usize> = HashMap::new();
    for gene in reference {
        *reference_counts.entry(gene.subject_id.as_str()).or_insert(0) += 1;
    }

    let mut actual_counts: HashMap<String, usize> = HashMap::new();
    for gene in &genes {
        *actual_counts.entry(gene.subject_id.clone()).or_insert(0) += 1;
    }

    // Drop excess genes, scanning from the end
    let mut to_remove: HashMap<String, usize> = actual_counts
        .iter()
        .filter_map(|(subject, &actual)| {
            let expected = reference_counts.get(subject.as_str()).copied().unwrap_or(0);
            (actual > expected).then(|| (subject.clone(), actual - expected))
        })
        .collect();

    let mut repaired = genes;
    if !to_remove.is_empty() {
        let mut index = repaired.len();
        while index > 0 {
            index -= 1;
            if let Some(remaining) = to_remove.get_mut(repaired[index].subject_id.as_str()) {
                if *remaining > 0 {
                    *remaining -= 1;
                    repaired.remove(index);
                }
            }
        }
    }

    // Append missing genes from the reference, keeping its subject order
    let mut seen: HashSet<&str> = HashSet::new();
    for gene in reference {
        let subject = gene.subject_id.as_str();
        if !seen.insert(subject) {
            continue;
        }
        let expected = reference_counts[subject];
        let actual = actual_counts.get(subject).copied().unwrap_or(0);
        if actual < expected {
            let donors = reference.iter().filter(|g| g.subject_id == subject);
            repaired.extend(donors.take(expected - actual).cloned());
        }
    }

    repaired
}

/// Mutates a chromosome in place.
///
/// Each gene independently mutates with probability `mutation_rate`; the
/// mutation kind is drawn uniformly. Room mutation is a no-op when the
/// type-appropriate pool is empty.
pub fn mutate<R: Rng>(
    chromosome: &mut Chromosome,
    mutation_rate: f64,
    rooms: &[Classroom],
    rng: &mut R,
) {
    for gene in &mut chromosome.genes {
        if !rng.random_bool(mutation_rate.clamp(0.0, 1.0)) {
            continue;
        }

        match *MUTATION_KINDS.choose(rng).expect("kinds are non-empty") {
            MutationKind::Day => {
                gene.day = *Day::ALL.choose(rng).expect("week is non-empty");
            }
            MutationKind::Time => {
                gene.start_min = SLOTS.choose(rng).expect("grid is non-empty").start_min;
            }
            MutationKind::Room => {
                let pool = room_pool(rooms, gene.session_type);
                if let Some(room) = pool.choose(rng) {
                    gene.room_id = room.id.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockPolicy;
    use crate::models::{Batch, SessionType, SubjectRequirement};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_batch() -> Batch {
        Batch::new("B1", 30)
            .with_subject(SubjectRequirement::new("MATH", "F1", 3, SessionType::Lecture))
            .with_subject(SubjectRequirement::new("PHY", "F2", 2, SessionType::Lecture))
            .with_subject(SubjectRequirement::new("OS-LAB", "F3", 3, SessionType::Lab))
    }

    fn sample_rooms() -> Vec<Classroom> {
        vec![
            Classroom::lecture("LH-1", 60),
            Classroom::seminar("S-1", 40),
            Classroom::lab("LAB-1", 40),
        ]
    }

    fn subject_hours(genes: &[Session]) -> HashMap<&str, u32> {
        let mut hours = HashMap::new();
        for gene in genes {
            *hours.entry(gene.subject_id.as_str()).or_insert(0) += gene.duration_hours;
        }
        hours
    }

    #[test]
    fn test_crossover_preserves_reference_hours() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let policy = BlockPolicy::default();
        let mut rng = SmallRng::seed_from_u64(42);

        for seed in 0..20 {
            let mut rng2 = SmallRng::seed_from_u64(seed);
            let p1 = Chromosome::random(&batch, &rooms, &policy, &mut rng2);
            let p2 = Chromosome::random(&batch, &rooms, &policy, &mut rng2);

            let (c1, c2) = crossover(&p1, &p2, &mut rng);
            assert_eq!(subject_hours(&c1.genes), subject_hours(&p1.genes));
            assert_eq!(subject_hours(&c2.genes), subject_hours(&p2.genes));
        }
    }

    #[test]
    fn test_crossover_with_tiny_parent_clones() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let mut rng = SmallRng::seed_from_u64(42);

        let p1 = Chromosome::random(&batch, &rooms, &BlockPolicy::default(), &mut rng);
        let p2 = Chromosome::new(Vec::new());

        let (c1, c2) = crossover(&p1, &p2, &mut rng);
        assert_eq!(c1.genes.len(), p1.genes.len());
        assert!(c2.genes.is_empty());
    }

    #[test]
    fn test_repair_removes_excess_from_end() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let mut rng = SmallRng::seed_from_u64(42);
        let reference = Chromosome::random(&batch, &rooms, &BlockPolicy::default(), &mut rng);

        // Duplicate the whole gene list: every subject is doubled
        let mut doubled = reference.genes.clone();
        doubled.extend(reference.genes.clone());

        let repaired = repair(doubled, &reference.genes);
        assert_eq!(subject_hours(&repaired), subject_hours(&reference.genes));
        // The surviving genes are the leading copies
        assert_eq!(repaired, reference.genes);
    }

    #[test]
    fn test_repair_restores_missing_subject() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let mut rng = SmallRng::seed_from_u64(42);
        let reference = Chromosome::random(&batch, &rooms, &BlockPolicy::default(), &mut rng);

        let without_math: Vec<Session> = reference
            .genes
            .iter()
            .filter(|g| g.subject_id != "MATH")
            .cloned()
            .collect();

        let repaired = repair(without_math, &reference.genes);
        assert_eq!(subject_hours(&repaired), subject_hours(&reference.genes));
    }

    #[test]
    fn test_mutation_never_changes_identity_fields() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let mut rng = SmallRng::seed_from_u64(42);

        let original = Chromosome::random(&batch, &rooms, &BlockPolicy::default(), &mut rng);
        let mut mutated = original.clone();
        mutate(&mut mutated, 1.0, &rooms, &mut rng);

        assert_eq!(mutated.genes.len(), original.genes.len());
        for (before, after) in original.genes.iter().zip(&mutated.genes) {
            assert_eq!(before.subject_id, after.subject_id);
            assert_eq!(before.faculty_id, after.faculty_id);
            assert_eq!(before.duration_hours, after.duration_hours);
            assert_eq!(before.session_type, after.session_type);
        }
    }

    #[test]
    fn test_mutated_rooms_stay_type_appropriate() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut chromosome = Chromosome::random(&batch, &rooms, &BlockPolicy::default(), &mut rng);
        for _ in 0..50 {
            mutate(&mut chromosome, 1.0, &rooms, &mut rng);
        }

        for gene in &chromosome.genes {
            let room = rooms.iter().find(|r| r.id == gene.room_id).unwrap();
            assert!(room.suits(gene.session_type));
        }
    }

    #[test]
    fn test_zero_rate_is_identity() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let mut rng = SmallRng::seed_from_u64(42);

        let original = Chromosome::random(&batch, &rooms, &BlockPolicy::default(), &mut rng);
        let mut untouched = original.clone();
        mutate(&mut untouched, 0.0, &rooms, &mut rng);
        assert_eq!(untouched.genes, original.genes);
    }
}
