//! # Circuit Evo - Evolving Entities Through a Circuit
//!
//! A genetic algorithm that evolves a population of simple physical entities
//! to travel from a spawn point to a goal region within a target time while
//! avoiding static obstacles.
//!
//! ## Features
//!
//! - Genomes of per-tick force vectors
//! - Deterministic per-tick physics integration
//! - Elliptical goal and rotated rectangular obstacles
//! - Fitness balancing time, distance to goal and goal arrival
//! - Fitness-proportional selection, single-point crossover, per-gene mutation
//! - Parallel ticking, evaluation and reproduction with rayon
//!
//! ## Core Modules
//!
//! - [`simulation::population`] - Generation lifecycle and genetic operators
//! - [`simulation::entity`] - Entity physics and collision state
//! - [`simulation::geometry`] - Goal, obstacles and circuit
//! - [`simulation::genome`] - Heritable force sequences
//! - [`simulation::fitness`] - Fitness formula
//!
//! Rendering, input handling and circuit storage are left to the embedding
//! application, which reads entity state and calls the lifecycle operations.

/// Core simulation logic and data structures.
pub mod simulation {
    /// Entities and their per-tick state machine.
    pub mod entity;
    /// Error type shared by the simulation core.
    pub mod error;
    /// Fitness formula.
    pub mod fitness;
    /// Force-vector genomes.
    pub mod genome;
    /// Static circuit geometry.
    ///
    /// The [`geometry::Collidable`] trait is implemented by the goal and by
    /// every obstacle.
    pub mod geometry;
    /// Simulation parameters.
    pub mod params;
    /// Generation lifecycle and genetic algorithm.
    pub mod population;
    /// Mating pool construction.
    pub mod selection;
    /// Per-generation statistics.
    pub mod stats;
    /// 2D vector math.
    pub mod vector;
}

pub use simulation::entity::{Entity, EntityState};
pub use simulation::error::SimulationError;
pub use simulation::geometry::{Circuit, Collidable, Goal, GoalSpec, Obstacle, ObstacleSpec};
pub use simulation::params::SimulationConfig;
pub use simulation::population::{GenerationPhase, Population, ReproductionReport};
pub use simulation::stats::{GenerationSummary, RunHistory};
pub use simulation::vector::Vector2;
