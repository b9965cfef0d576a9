//! Population management.
//!
//! Seeds the initial pool of random chromosomes and implements the two
//! reproduction primitives the engine composes: tournament selection and
//! the elite slice carried verbatim into the next generation.

use log::debug;
use rand::Rng;

use super::Chromosome;
use crate::blocks::BlockPolicy;
use crate::models::{Batch, Classroom};

/// Creates `size` independent random chromosomes.
pub fn initialize_population<R: Rng>(
    batch: &Batch,
    rooms: &[Classroom],
    policy: &BlockPolicy,
    size: usize,
    rng: &mut R,
) -> Vec<Chromosome> {
    debug!("initializing population of {size} chromosomes");
    (0..size)
        .map(|_| Chromosome::random(batch, rooms, policy, rng))
        .collect()
}

/// Tournament selection: draws `tournament_size` random individuals and
/// returns the fittest.
///
/// The population must be non-empty and already evaluated; a tournament
/// size of zero is treated as one.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Chromosome],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Chromosome {
    let rounds = tournament_size.max(1);
    let mut best = &population[rng.random_range(0..population.len())];
    for _ in 1..rounds {
        let challenger = &population[rng.random_range(0..population.len())];
        if challenger.fitness > best.fitness {
            best = challenger;
        }
    }
    best
}

/// Number of elites for a population size and ratio.
pub fn elite_count(population_size: usize, elite_ratio: f64) -> usize {
    (population_size as f64 * elite_ratio).floor() as usize
}

/// The elite slice of a population already sorted by descending fitness.
pub fn elites(sorted_population: &[Chromosome], elite_ratio: f64) -> &[Chromosome] {
    let count = elite_count(sorted_population.len(), elite_ratio);
    &sorted_population[..count.min(sorted_population.len())]
}
