//! Evolution engine.
//!
//! The generational loop: evaluate, sort, track the best-ever encoding,
//! stop on budget / target fitness / stagnation, otherwise refill the
//! population from elites plus selected-crossed-mutated offspring.
//!
//! The engine never fails: it returns its best-ever chromosome even when
//! hard constraints remain violated. Callers judge feasibility from the
//! returned constraint report or the independent week validator.

use log::{debug, info};
use rand::Rng;

use super::{crossover, elites, initialize_population, mutate, tournament_selection, Chromosome};
use crate::blocks::BlockPolicy;
use crate::constraints::{ConstraintReport, FITNESS_TARGET};
use crate::models::{Batch, Classroom};

/// Evolution parameters.
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generation budget.
    pub generations: u32,
    /// Individuals drawn per tournament.
    pub tournament_size: usize,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Fraction of the population cloned verbatim into the next generation.
    pub elite_ratio: f64,
    /// Probability that a parent pair recombines instead of cloning.
    pub crossover_rate: f64,
    /// Fitness at which evolution stops immediately.
    pub target_fitness: f64,
    /// Generations without best-ever improvement before stopping early.
    pub stagnation_limit: u32,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            tournament_size: 3,
            mutation_rate: 0.15,
            elite_ratio: 0.1,
            crossover_rate: 0.8,
            target_fitness: FITNESS_TARGET,
            stagnation_limit: 20,
        }
    }
}

impl GaConfig {
    /// Sets the population size (minimum 1).
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(1);
        self
    }

    /// Sets the generation budget.
    pub fn with_generations(mut self, generations: u32) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the tournament size (minimum 1).
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size.max(1);
        self
    }

    /// Sets the per-gene mutation rate, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite ratio, clamped to [0, 1].
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate, clamped to [0, 1].
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the early-stop fitness target.
    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = target;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, limit: u32) -> Self {
        self.stagnation_limit = limit;
        self
    }
}

/// Result of one evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// Best chromosome seen across all generations.
    pub best: Chromosome,
    /// Generations actually evaluated.
    pub generations_run: u32,
    /// Constraint report of the best chromosome.
    pub report: ConstraintReport,
}

/// Evolves a population toward a conflict-free week for one batch.
///
/// Termination, checked per generation in order: generation budget
/// exhausted, current best at or above `target_fitness`, or
/// `stagnation_limit` generations without a best-ever improvement.
pub fn evolve<R: Rng>(
    batch: &Batch,
    rooms: &[Classroom],
    policy: &BlockPolicy,
    config: &GaConfig,
    rng: &mut R,
) -> EvolutionOutcome {
    let population_size = config.population_size.max(1);
    info!(
        "evolving timetable for batch {}: population {population_size}, budget {} generations",
        batch.id, config.generations
    );

    let mut population = initialize_population(batch, rooms, policy, population_size, rng);
    let mut best_ever: Option<Chromosome> = None;
    let mut best_ever_fitness = f64::NEG_INFINITY;
    let mut stagnant_generations = 0u32;
    let mut generations_run = 0u32;

    for generation in 0..config.generations {
        for chromosome in &mut population {
            chromosome.evaluate(batch, rooms);
        }
        population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        generations_run = generation + 1;

        let current_best_fitness = population[0].fitness;
        if current_best_fitness > best_ever_fitness {
            best_ever = Some(population[0].clone());
            best_ever_fitness = current_best_fitness;
            stagnant_generations = 0;
            debug!("generation {generation}: new best fitness {best_ever_fitness:.2}");
        } else {
            stagnant_generations += 1;
        }

        if current_best_fitness >= config.target_fitness {
            info!("target fitness reached in generation {generation}");
            break;
        }
        if stagnant_generations >= config.stagnation_limit {
            info!(
                "stopping early: no improvement for {} generations",
                config.stagnation_limit
            );
            break;
        }

        let mut next_generation: Vec<Chromosome> =
            elites(&population, config.elite_ratio).to_vec();

        while next_generation.len() < population_size {
            let parent1 = tournament_selection(&population, config.tournament_size, rng);
            let parent2 = tournament_selection(&population, config.tournament_size, rng);

            let (mut child1, mut child2) = if rng.random_bool(config.crossover_rate.clamp(0.0, 1.0)) {
                crossover(parent1, parent2, rng)
            } else {
                (parent1.clone(), parent2.clone())
            };

            mutate(&mut child1, config.mutation_rate, rooms, rng);
            mutate(&mut child2, config.mutation_rate, rooms, rng);

            next_generation.push(child1);
            if next_generation.len() < population_size {
                next_generation.push(child2);
            }
        }

        population = next_generation;
    }

    let best = best_ever.unwrap_or_else(|| {
        // Zero-generation budget: fall back to a single evaluated draw
        let mut chromosome = Chromosome::random(batch, rooms, policy, rng);
        chromosome.evaluate(batch, rooms);
        chromosome
    });

    let report = best.report(batch, rooms);
    info!(
        "evolution complete after {generations_run} generations: fitness {:.2}, {} hard violations",
        report.fitness,
        report.hard.total()
    );

    EvolutionOutcome {
        best,
        generations_run,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionType, SubjectRequirement};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_batch() -> Batch {
        Batch::new("B1", 30)
            .with_name("CS Semester 3")
            .with_subject(SubjectRequirement::new("MATH", "F1", 3, SessionType::Lecture))
            .with_subject(SubjectRequirement::new("PHY", "F2", 2, SessionType::Lecture))
            .with_subject(SubjectRequirement::new("OS-LAB", "F3", 3, SessionType::Lab))
    }

    fn sample_rooms() -> Vec<Classroom> {
        vec![
            Classroom::lecture("LH-1", 60),
            Classroom::lecture("LH-2", 60),
            Classroom::seminar("S-1", 40),
            Classroom::lab("LAB-1", 40),
        ]
    }

    #[test]
    fn test_config_defaults() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.generations, 100);
        assert_eq!(config.tournament_size, 3);
        assert!((config.mutation_rate - 0.15).abs() < 1e-10);
        assert!((config.elite_ratio - 0.1).abs() < 1e-10);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.target_fitness - 1000.0).abs() < 1e-10);
        assert_eq!(config.stagnation_limit, 20);
    }

    #[test]
    fn test_config_builders_clamp() {
        let config = GaConfig::default()
            .with_population_size(0)
            .with_tournament_size(0)
            .with_mutation_rate(1.5)
            .with_crossover_rate(-0.2)
            .with_elite_ratio(2.0);
        assert_eq!(config.population_size, 1);
        assert_eq!(config.tournament_size, 1);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        assert!(config.crossover_rate.abs() < 1e-10);
        assert!((config.elite_ratio - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_generation_terminates() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let config = GaConfig::default()
            .with_generations(1)
            .with_population_size(4);
        let mut rng = SmallRng::seed_from_u64(42);

        let outcome = evolve(&batch, &rooms, &BlockPolicy::default(), &config, &mut rng);
        assert_eq!(outcome.generations_run, 1);
        assert!(!outcome.best.genes.is_empty());
        assert!(outcome.best.fitness.is_finite());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let policy = BlockPolicy::default();
        let config = GaConfig::default()
            .with_generations(15)
            .with_population_size(12);

        let mut rng1 = SmallRng::seed_from_u64(42);
        let mut rng2 = SmallRng::seed_from_u64(42);
        let outcome1 = evolve(&batch, &rooms, &policy, &config, &mut rng1);
        let outcome2 = evolve(&batch, &rooms, &policy, &config, &mut rng2);

        assert_eq!(outcome1.generations_run, outcome2.generations_run);
        assert_eq!(outcome1.best.genes, outcome2.best.genes);
        assert!((outcome1.best.fitness - outcome2.best.fitness).abs() < 1e-12);
    }

    #[test]
    fn test_stagnation_stops_early() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let config = GaConfig::default()
            .with_generations(1000)
            .with_population_size(8)
            .with_stagnation_limit(3)
            // Unreachable target so only stagnation can stop the run early
            .with_target_fitness(f64::INFINITY);
        let mut rng = SmallRng::seed_from_u64(42);

        let outcome = evolve(&batch, &rooms, &BlockPolicy::default(), &config, &mut rng);
        assert!(outcome.generations_run < 1000);
    }

    #[test]
    fn test_best_hours_match_requirements_when_feasible() {
        let batch = sample_batch();
        let rooms = sample_rooms();
        let config = GaConfig::default()
            .with_generations(60)
            .with_population_size(40);
        let mut rng = SmallRng::seed_from_u64(7);

        let outcome = evolve(&batch, &rooms, &BlockPolicy::default(), &config, &mut rng);
        // Construction and repair keep per-subject hours at quota, so the
        // missing-hours count stays zero throughout evolution
        assert_eq!(outcome.report.hard.missing_hours, 0);
    }

    #[test]
    fn test_empty_batch_still_returns() {
        let batch = Batch::new("EMPTY", 30);
        let rooms = sample_rooms();
        let config = GaConfig::default()
            .with_generations(2)
            .with_population_size(4);
        let mut rng = SmallRng::seed_from_u64(42);

        let outcome = evolve(&batch, &rooms, &BlockPolicy::default(), &config, &mut rng);
        assert!(outcome.best.genes.is_empty());
        assert_eq!(outcome.report.hard.total(), 0);
    }
}
