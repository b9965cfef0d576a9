//! Genetic algorithm for timetable generation.
//!
//! The primary generation path: a population of candidate weeks evolves
//! under tournament selection, single-point crossover with per-subject
//! repair, placement mutation, and elitism until every hard constraint is
//! satisfied, the generation budget runs out, or progress stalls.
//!
//! # Submodules
//!
//! - [`Chromosome`]: the session-list encoding with cached fitness
//! - `population`: seeding, tournament selection, elites
//! - `operators`: crossover with repair, day/time/room mutation
//! - `engine`: the generational loop and its configuration

mod chromosome;
mod engine;
mod operators;
mod population;

pub use chromosome::Chromosome;
pub use engine::{evolve, EvolutionOutcome, GaConfig};
pub use operators::{crossover, mutate};
pub use population::{elite_count, elites, initialize_population, tournament_selection};
