use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Result, SimulationError};
use super::fitness::FitnessParams;
use super::selection::SelectionParams;

/// Largest accepted population size.
pub const MAX_POPULATION_SIZE: usize = 15_000;
/// Smallest accepted target time in ticks.
pub const MIN_TARGET_TIME: u32 = 2;

/// Simulation parameters that control a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of entities per generation.
    pub population_size: usize,
    /// Per-gene mutation probability as a percentage in `[0, 100]`.
    pub mutation_percent: f32,
    /// Number of ticks the entities should ideally need to reach the goal.
    pub target_time: u32,
    /// Ticks per generation, which is also the genome length.
    pub lifespan: u32,
    /// Fitness formula constants.
    pub fitness: FitnessParams,
    /// Mating pool construction.
    pub selection: SelectionParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            mutation_percent: 1.0,
            target_time: 250,
            lifespan: 400,
            fitness: FitnessParams::default(),
            selection: SelectionParams::default(),
        }
    }
}

impl SimulationConfig {
    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        validate_population_size(self.population_size)?;
        validate_mutation_percent(self.mutation_percent)?;
        validate_timing(self.target_time, self.lifespan)?;
        if !(self.fitness.time_exponent.is_finite() && self.fitness.reach_bonus.is_finite())
            || self.fitness.reach_bonus < 0.0
        {
            return Err(invalid("fitness constants must be finite and non-negative"));
        }
        if !self.selection.pool_scale.is_finite() || self.selection.pool_scale <= 0.0 {
            return Err(invalid("pool scale must be positive"));
        }
        Ok(())
    }

    /// Mutation probability as a fraction in `[0, 1]`.
    pub fn mutation_rate(&self) -> f32 {
        self.mutation_percent / 100.0
    }

    /// Raises `lifespan` so that it exceeds `target_time`.
    ///
    /// Intended for the boundary where user-supplied parameters are accepted;
    /// the simulation itself only validates.
    #[must_use]
    pub fn with_clamped_lifespan(mut self) -> Self {
        if self.lifespan <= self.target_time {
            self.lifespan = self.target_time.saturating_add(1);
        }
        self
    }

    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        Ok(config)
    }
}

pub(crate) fn validate_population_size(size: usize) -> Result<()> {
    if size == 0 || size > MAX_POPULATION_SIZE {
        return Err(invalid(format!(
            "population size must be in [1, {MAX_POPULATION_SIZE}], got {size}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_mutation_percent(percent: f32) -> Result<()> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(invalid(format!(
            "mutation rate must be a percentage in [0, 100], got {percent}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_timing(target_time: u32, lifespan: u32) -> Result<()> {
    if lifespan == 0 {
        return Err(invalid("lifespan must be positive"));
    }
    if target_time < MIN_TARGET_TIME {
        return Err(invalid(format!(
            "target time must be at least {MIN_TARGET_TIME}, got {target_time}"
        )));
    }
    if target_time >= lifespan {
        return Err(invalid(format!(
            "target time ({target_time}) must be below lifespan ({lifespan})"
        )));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> SimulationError {
    SimulationError::InvalidConfiguration(message.into())
}
