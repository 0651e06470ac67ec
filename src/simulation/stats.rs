use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::entity::Entity;

/// Outcome of one evaluated generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Generation number, starting at 1.
    pub generation: u32,
    /// Highest fitness in the generation.
    pub best_fitness: f32,
    /// Mean fitness over the generation.
    pub mean_fitness: f32,
    /// Fewest elapsed ticks among goal-reachers, if any reached.
    pub time_record: Option<u32>,
    /// Entities that reached the goal.
    pub reached_count: usize,
    /// Entities stopped by an obstacle.
    pub collided_count: usize,
    /// Mating pool entries, counting repeats.
    pub pool_size: usize,
    /// Whether parents were drawn uniformly because the pool would have been empty.
    pub uniform_fallback: bool,
}

impl GenerationSummary {
    /// Summarizes evaluated entities.
    pub fn from_entities(generation: u32, entities: &[Entity], pool_size: usize, uniform_fallback: bool) -> Self {
        let best_fitness = entities.iter().map(Entity::fitness).fold(0.0_f32, f32::max);
        let mean_fitness = if entities.is_empty() {
            0.0
        } else {
            entities.iter().map(Entity::fitness).sum::<f32>() / entities.len() as f32
        };
        let time_record = entities
            .iter()
            .filter(|e| e.has_reached())
            .map(Entity::elapsed_ticks)
            .min();

        Self {
            generation,
            best_fitness,
            mean_fitness,
            time_record,
            reached_count: entities.iter().filter(|e| e.has_reached()).count(),
            collided_count: entities.iter().filter(|e| e.has_collided()).count(),
            pool_size,
            uniform_fallback,
        }
    }
}

/// Bounded history of generation summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunHistory {
    /// Most recent summaries, oldest first.
    pub summaries: VecDeque<GenerationSummary>,
    /// Maximum number of summaries retained.
    pub max_history: usize,
    /// Fewest ticks any entity ever needed to reach the goal during the run.
    pub best_time_record: Option<u32>,
}

impl Default for RunHistory {
    fn default() -> Self {
        Self {
            summaries: VecDeque::new(),
            max_history: 100,
            best_time_record: None,
        }
    }
}

impl RunHistory {
    /// Records a generation, dropping the oldest summary beyond `max_history`.
    pub fn record(&mut self, summary: GenerationSummary) {
        if let Some(time) = summary.time_record {
            self.best_time_record = Some(self.best_time_record.map_or(time, |best| best.min(time)));
        }
        self.summaries.push_back(summary);
        if self.summaries.len() > self.max_history {
            self.summaries.pop_front();
        }
    }

    /// Most recent summary.
    pub fn last(&self) -> Option<&GenerationSummary> {
        self.summaries.back()
    }

    /// Average best fitness over the retained summaries.
    pub fn avg_best_fitness(&self) -> f32 {
        if self.summaries.is_empty() {
            0.0
        } else {
            self.summaries.iter().map(|s| s.best_fitness).sum::<f32>() / self.summaries.len() as f32
        }
    }

    /// Average number of goal-reachers over the retained summaries.
    pub fn avg_reached_count(&self) -> f32 {
        if self.summaries.is_empty() {
            0.0
        } else {
            self.summaries.iter().map(|s| s.reached_count as f32).sum::<f32>()
                / self.summaries.len() as f32
        }
    }

    /// Number of retained summaries.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Whether no generation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Saves the history as pretty JSON.
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> super::error::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
