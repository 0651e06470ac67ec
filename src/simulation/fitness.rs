//! Fitness scoring of an evaluated entity.
//!
//! ```text
//! time_factor = (target_time / elapsed_ticks) ^ time_exponent
//! fitness     = time_factor / (elapsed_ticks * min_distance)
//! ```
//!
//! `min_distance` is clamped up to the goal radius first, so every entity
//! that ends inside the goal is credited the same distance. Reaching the goal
//! multiplies the score by `reach_bonus`. Collisions carry no extra penalty.

use serde::{Deserialize, Serialize};

/// Tunable constants of the fitness formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessParams {
    /// Exponent applied to `target_time / elapsed_ticks`.
    pub time_exponent: f32,
    /// Multiplier for entities that reached the goal.
    pub reach_bonus: f32,
}

impl Default for FitnessParams {
    fn default() -> Self {
        Self {
            time_exponent: 0.25,
            reach_bonus: 4.0,
        }
    }
}

/// What an entity achieved during its generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Ticks counted on the entity's clock.
    pub elapsed_ticks: u32,
    /// Closest distance ever reached to the goal center.
    pub min_distance_to_goal: f32,
    /// Whether the entity ended inside the goal.
    pub reached: bool,
}

/// Clamps `min_distance` up to `goal_radius`.
pub fn normalized_distance(min_distance: f32, goal_radius: f32) -> f32 {
    min_distance.max(goal_radius)
}

/// Scores an outcome. Always finite and non-negative.
pub fn score(outcome: &Outcome, target_time: u32, goal_radius: f32, params: &FitnessParams) -> f32 {
    let distance = normalized_distance(outcome.min_distance_to_goal, goal_radius);
    if !distance.is_finite() || distance <= 0.0 {
        return 0.0;
    }

    let elapsed = outcome.elapsed_ticks.max(1) as f32;
    let time_factor = (target_time as f32 / elapsed).powf(params.time_exponent);

    let mut fitness = time_factor / (elapsed * distance);
    if outcome.reached {
        fitness *= params.reach_bonus;
    }

    if fitness.is_finite() { fitness.max(0.0) } else { 0.0 }
}
