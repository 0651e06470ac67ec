//! A single simulated agent and its per-tick physics.
//!
//! An entity starts [`EntityState::Active`] and moves by consuming one gene
//! per tick. Entering the goal moves it to [`EntityState::Reached`] and
//! freezes its clock; touching an obstacle moves it to
//! [`EntityState::Collided`], which stops movement while the clock keeps
//! running. Neither transition is undone within a generation.

use serde::{Deserialize, Serialize};

use super::fitness::{self, FitnessParams, Outcome};
use super::genome::Genome;
use super::geometry::{Circuit, Collidable};
use super::vector::Vector2;

/// Movement state of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityState {
    /// Still moving.
    Active,
    /// Hit an obstacle. Stopped, clock running.
    Collided,
    /// Inside the goal. Stopped, clock frozen.
    Reached,
}

/// One agent of a generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    index: usize,
    /// Current position.
    pub position: Vector2,
    /// Current velocity.
    pub velocity: Vector2,
    /// Acceleration accumulated this tick (zero between ticks).
    pub acceleration: Vector2,
    genome: Genome,
    gene_cursor: usize,
    state: EntityState,
    elapsed_ticks: u32,
    min_distance_to_goal: f32,
    fitness: f32,
}

impl Entity {
    /// Creates an entity at rest at `spawn`.
    pub fn new(index: usize, spawn: Vector2, genome: Genome) -> Self {
        Self {
            index,
            position: spawn,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            genome,
            gene_cursor: 0,
            state: EntityState::Active,
            elapsed_ticks: 0,
            min_distance_to_goal: f32::INFINITY,
            fitness: 0.0,
        }
    }

    /// Advances the entity by one tick against `circuit`.
    pub fn tick(&mut self, circuit: &Circuit) {
        match self.state {
            EntityState::Reached => return,
            EntityState::Collided => {
                self.elapsed_ticks += 1;
                return;
            }
            EntityState::Active => {}
        }

        // Exhausted genomes coast with no extra force.
        let force = match self.genome.gene(self.gene_cursor) {
            Some(force) => {
                self.gene_cursor += 1;
                force
            }
            None => Vector2::ZERO,
        };

        self.acceleration += force;
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vector2::ZERO;

        self.elapsed_ticks += 1;

        let goal = circuit.goal();
        let distance = self.position.distance(&goal.center());
        if distance < self.min_distance_to_goal {
            self.min_distance_to_goal = distance;
        }

        if goal.contains(&self.position) {
            self.state = EntityState::Reached;
            return;
        }

        if circuit
            .obstacles()
            .iter()
            .any(|obstacle| obstacle.contains(&self.position))
        {
            self.state = EntityState::Collided;
        }
    }

    /// Computes, stores and returns this entity's fitness.
    pub fn evaluate_fitness(&mut self, circuit: &Circuit, target_time: u32, params: &FitnessParams) -> f32 {
        let goal_radius = circuit.goal().semi_vertical();
        self.min_distance_to_goal =
            fitness::normalized_distance(self.min_distance_to_goal, goal_radius);
        self.fitness = fitness::score(&self.outcome(), target_time, goal_radius, params);
        self.fitness
    }

    /// Snapshot of what the entity achieved so far.
    pub fn outcome(&self) -> Outcome {
        Outcome {
            elapsed_ticks: self.elapsed_ticks,
            min_distance_to_goal: self.min_distance_to_goal,
            reached: self.has_reached(),
        }
    }

    /// Slot of this entity in its generation.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current movement state.
    pub fn state(&self) -> EntityState {
        self.state
    }

    /// Whether an obstacle stopped the entity.
    pub fn has_collided(&self) -> bool {
        self.state == EntityState::Collided
    }

    /// Whether the entity is inside the goal.
    pub fn has_reached(&self) -> bool {
        self.state == EntityState::Reached
    }

    /// Ticks counted on the entity's clock.
    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    /// Closest distance to the goal center so far.
    pub fn min_distance_to_goal(&self) -> f32 {
        self.min_distance_to_goal
    }

    /// Fitness from the last evaluation, `0.0` before that.
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Number of genes consumed.
    pub fn gene_cursor(&self) -> usize {
        self.gene_cursor
    }

    /// The entity's genome.
    pub fn genome(&self) -> &Genome {
        &self.genome
    }
}
