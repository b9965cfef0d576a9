//! Constraint-based weekly timetable scheduling.
//!
//! Given a batch's subject requirements (subject, assigned faculty,
//! weekly-hour quota, session kind), the available classrooms, and the
//! committed schedules of other batches, this crate produces
//! conflict-minimized weekly schedules. The primary path is a genetic
//! algorithm; a greedy first-fit heuristic serves as the fast
//! alternative. Both are pure in-process computations with no I/O.
//!
//! # Modules
//!
//! - **`models`**: Domain types — the `Day`/`TimeSlot` grid, `Batch`,
//!   `SubjectRequirement`, `Classroom`, `Session`, `BatchSchedule`
//! - **`availability`**: One-shot snapshot of slots committed elsewhere
//! - **`blocks`**: Policy splitting weekly hours into placement blocks
//! - **`constraints`**: Hard/soft constraint evaluation and fitness
//! - **`ga`**: Chromosome encoding, genetic operators, evolution engine
//! - **`scheduler`**: The greedy heuristic and the options wrapper
//! - **`validation`**: Input checks and the post-hoc week validator
//!
//! # Guarantees
//!
//! Scheduling never fails with an error: infeasible inputs yield the
//! best week found, and feasibility is judged from the returned
//! constraint report or `validation::validate_week`. All randomness is
//! injected (`rand::Rng` parameters), so seeded runs are reproducible.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"
//! - Eiben & Smith (2015), "Introduction to Evolutionary Computing"

pub mod availability;
pub mod blocks;
pub mod constraints;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod validation;
