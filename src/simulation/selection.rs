//! Fitness-proportional parent selection through a repeated-insertion pool.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Parameters of the mating pool construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParams {
    /// Copies inserted per unit of (possibly normalized) fitness.
    pub pool_scale: f32,
    /// Divide every score by the generation's best score before scaling.
    ///
    /// Without this, raw scores are usually far below `1 / pool_scale` and
    /// almost every generation falls back to uniform selection.
    pub normalize_to_best: bool,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            pool_scale: 100.0,
            normalize_to_best: true,
        }
    }
}

/// Multiset of entity indices to draw parents from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatingPool {
    indices: Vec<usize>,
    uniform_fallback: bool,
}

impl MatingPool {
    /// Number of entries, counting repeats.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the pool holds no entries.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether the pool was filled uniformly because every score rounded to zero copies.
    pub fn uniform_fallback(&self) -> bool {
        self.uniform_fallback
    }

    /// Pool entries.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// How many times `index` appears.
    pub fn copies_of(&self, index: usize) -> usize {
        self.indices.iter().filter(|&&i| i == index).count()
    }

    /// Draws one entity index uniformly, with replacement.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.indices.is_empty() {
            return None;
        }
        Some(self.indices[rng.random_range(0..self.indices.len())])
    }

    /// Empties the pool.
    pub fn clear(&mut self) {
        self.indices.clear();
        self.uniform_fallback = false;
    }
}

/// Builds the mating pool for a generation's fitness scores.
///
/// Entry `i` is inserted `round(score * pool_scale)` times. If that yields no
/// entries at all, every index is inserted once.
pub fn mating_pool(scores: &[f32], params: &SelectionParams) -> MatingPool {
    let best = scores.iter().copied().fold(0.0_f32, f32::max);
    let divisor = if params.normalize_to_best && best > 0.0 {
        best
    } else {
        1.0
    };

    let mut indices = Vec::new();
    for (index, &score) in scores.iter().enumerate() {
        let copies = (score / divisor * params.pool_scale).round();
        if copies.is_finite() && copies > 0.0 {
            indices.extend(std::iter::repeat_n(index, copies as usize));
        }
    }

    let uniform_fallback = indices.is_empty() && !scores.is_empty();
    if uniform_fallback {
        warn!(
            entities = scores.len(),
            best_fitness = best,
            "Every fitness rounded to zero copies, selecting parents uniformly"
        );
        indices.extend(0..scores.len());
    }

    MatingPool {
        indices,
        uniform_fallback,
    }
}
