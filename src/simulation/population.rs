//! Population lifecycle and the generational genetic algorithm.
//!
//! A run moves through `seed -> tick* -> evaluate -> reproduce -> tick* -> ...`.
//! Ticking, fitness evaluation and offspring construction run in parallel
//! with rayon since entities never read each other's state. Pool
//! construction between them is sequential.

use std::sync::Arc;

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::entity::Entity;
use super::error::{Result, SimulationError};
use super::genome::Genome;
use super::geometry::Circuit;
use super::params::{self, SimulationConfig};
use super::selection::{self, MatingPool};
use super::stats::{GenerationSummary, RunHistory};
use super::vector::Vector2;

/// Where the current generation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationPhase {
    /// Freshly seeded or reproduced, no tick yet.
    Seeded,
    /// At least one tick has run.
    Ticking,
    /// Fitness computed and mating pool built.
    Evaluated,
}

/// Result of producing a new generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReproductionReport {
    /// Number of the generation that was just created.
    pub generation: u32,
    /// Entities in the new generation.
    pub offspring: usize,
    /// Genes across all offspring.
    pub genes: usize,
    /// Genes regenerated by mutation.
    pub mutated_genes: usize,
}

/// The live generation and everything needed to breed the next one.
#[derive(Debug, Clone)]
pub struct Population {
    entities: Vec<Entity>,
    mating_pool: MatingPool,
    config: SimulationConfig,
    circuit: Arc<Circuit>,
    spawn: Vector2,
    generation: u32,
    ticks: u32,
    generation_lifespan: u32,
    phase: GenerationPhase,
    summary: Option<GenerationSummary>,
    history: RunHistory,
}

impl Population {
    /// Creates generation 1 with random genomes, every entity at `spawn`.
    #[instrument(level = "debug", skip(config, circuit), fields(population_size = config.population_size, lifespan = config.lifespan))]
    pub fn seed(config: SimulationConfig, circuit: Arc<Circuit>, spawn: Vector2) -> Result<Self> {
        config.validate()?;

        let lifespan = config.lifespan as usize;
        let entities = (0..config.population_size)
            .into_par_iter()
            .map(|index| Genome::create(lifespan).map(|genome| Entity::new(index, spawn, genome)))
            .collect::<Result<Vec<_>>>()?;

        debug!(entities = entities.len(), "Seeded population");

        Ok(Self {
            entities,
            mating_pool: MatingPool::default(),
            generation_lifespan: config.lifespan,
            config,
            circuit,
            spawn,
            generation: 1,
            ticks: 0,
            phase: GenerationPhase::Seeded,
            summary: None,
            history: RunHistory::default(),
        })
    }

    /// Advances every entity by one tick.
    ///
    /// Returns `false` without doing anything once the generation's lifespan
    /// is consumed or the generation has been evaluated.
    pub fn tick(&mut self) -> bool {
        if self.phase == GenerationPhase::Evaluated || self.is_generation_complete() {
            return false;
        }

        let circuit = self.circuit.as_ref();
        self.entities
            .par_iter_mut()
            .for_each(|entity| entity.tick(circuit));

        self.ticks += 1;
        self.phase = GenerationPhase::Ticking;
        true
    }

    /// Whether the generation has run for its whole lifespan.
    pub fn is_generation_complete(&self) -> bool {
        self.ticks >= self.generation_lifespan
    }

    /// Scores every entity and builds the mating pool.
    ///
    /// Calling this again before [`Population::reproduce`] returns the
    /// existing summary unchanged.
    #[instrument(level = "debug", skip(self), fields(generation = self.generation, ticks = self.ticks))]
    pub fn evaluate(&mut self) -> GenerationSummary {
        if let (GenerationPhase::Evaluated, Some(summary)) = (self.phase, &self.summary) {
            return summary.clone();
        }

        let circuit = self.circuit.as_ref();
        let target_time = self.config.target_time;
        let fitness_params = self.config.fitness;
        self.entities.par_iter_mut().for_each(|entity| {
            entity.evaluate_fitness(circuit, target_time, &fitness_params);
        });

        let scores: Vec<f32> = self.entities.iter().map(Entity::fitness).collect();
        self.mating_pool = selection::mating_pool(&scores, &self.config.selection);

        let summary = GenerationSummary::from_entities(
            self.generation,
            &self.entities,
            self.mating_pool.len(),
            self.mating_pool.uniform_fallback(),
        );

        info!(
            generation = summary.generation,
            best_fitness = summary.best_fitness,
            time_record = ?summary.time_record,
            reached = summary.reached_count,
            collided = summary.collided_count,
            pool_size = summary.pool_size,
            "Generation evaluated"
        );

        self.history.record(summary.clone());
        self.summary = Some(summary.clone());
        self.phase = GenerationPhase::Evaluated;
        summary
    }

    /// Replaces the generation with offspring bred from the mating pool.
    ///
    /// Each child takes two parents drawn with replacement, a single-point
    /// crossover and per-gene mutation. Uses the population size, lifespan
    /// and mutation rate configured at the time of the call.
    #[instrument(level = "debug", skip(self), fields(generation = self.generation, pool_size = self.mating_pool.len()))]
    pub fn reproduce(&mut self) -> Result<ReproductionReport> {
        if self.mating_pool.is_empty() {
            return Err(SimulationError::EmptyMatingPool);
        }

        let size = self.config.population_size;
        let lifespan = self.config.lifespan as usize;
        let mutation_rate = self.config.mutation_rate();
        let parents = &self.entities;
        let pool = &self.mating_pool;
        let spawn = self.spawn;

        let offspring = (0..size)
            .into_par_iter()
            .map(|index| {
                let mut rng = rand::rng();
                let (Some(a), Some(b)) = (pool.draw(&mut rng), pool.draw(&mut rng)) else {
                    return Err(SimulationError::EmptyMatingPool);
                };
                let split = rng.random_range(0..lifespan);
                let mut genome =
                    Genome::crossover(parents[a].genome(), parents[b].genome(), split, lifespan)?;
                let mutated = genome.mutate(mutation_rate);
                Ok((Entity::new(index, spawn, genome), mutated))
            })
            .collect::<Result<Vec<_>>>()?;

        let mutated_genes: usize = offspring.iter().map(|(_, mutated)| mutated).sum();
        self.entities = offspring.into_iter().map(|(entity, _)| entity).collect();
        self.mating_pool.clear();
        self.generation += 1;
        self.ticks = 0;
        self.generation_lifespan = self.config.lifespan;
        self.phase = GenerationPhase::Seeded;
        self.summary = None;

        let report = ReproductionReport {
            generation: self.generation,
            offspring: size,
            genes: size * lifespan,
            mutated_genes,
        };
        debug!(?report, "Reproduced population");
        Ok(report)
    }

    /// Ticks to the end of the lifespan, evaluates and reproduces.
    pub fn run_generation(&mut self) -> Result<GenerationSummary> {
        while self.tick() {}
        let summary = self.evaluate();
        self.reproduce()?;
        Ok(summary)
    }

    /// Discards entities, pool, counters and history, then seeds generation 1 again.
    ///
    /// On failure the population is left untouched.
    pub fn reset(&mut self) -> Result<()> {
        *self = Self::seed(self.config.clone(), Arc::clone(&self.circuit), self.spawn)?;
        Ok(())
    }

    /// Sets the mutation rate as a percentage in `[0, 100]`. Applies at the next reproduction.
    pub fn set_mutation_rate(&mut self, percent: f32) -> Result<()> {
        params::validate_mutation_percent(percent)?;
        self.config.mutation_percent = percent;
        Ok(())
    }

    /// Sets the target time. Applies at the next evaluation.
    pub fn set_target_time(&mut self, target_time: u32) -> Result<()> {
        params::validate_timing(target_time, self.config.lifespan)?;
        self.config.target_time = target_time;
        Ok(())
    }

    /// Sets the lifespan. Applies from the next generation; the current one keeps its own.
    pub fn set_lifespan(&mut self, lifespan: u32) -> Result<()> {
        params::validate_timing(self.config.target_time, lifespan)?;
        self.config.lifespan = lifespan;
        Ok(())
    }

    /// Sets the population size. Applies at the next seed or reproduction.
    pub fn set_population_size(&mut self, size: usize) -> Result<()> {
        params::validate_population_size(size)?;
        self.config.population_size = size;
        Ok(())
    }

    /// Entities of the current generation, in slot order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Current generation number, starting at 1.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ticks run in the current generation.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Lifespan the current generation was created with.
    pub fn generation_lifespan(&self) -> u32 {
        self.generation_lifespan
    }

    /// Lifecycle phase of the current generation.
    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Pending configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Shared circuit geometry.
    pub fn circuit(&self) -> &Arc<Circuit> {
        &self.circuit
    }

    /// Spawn point of every entity.
    pub fn spawn(&self) -> Vector2 {
        self.spawn
    }

    /// Mating pool of the evaluated generation. Empty outside evaluation and reproduction.
    pub fn mating_pool(&self) -> &MatingPool {
        &self.mating_pool
    }

    /// Summaries of evaluated generations.
    pub fn history(&self) -> &RunHistory {
        &self.history
    }
}
