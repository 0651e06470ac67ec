//! Genome of force vectors driving one entity.
//!
//! Each row of the gene matrix is one force `(fx, fy)` consumed on one
//! simulated tick. Forces point in a uniformly random direction with a
//! uniformly random magnitude in [`MIN_FORCE`, `MAX_FORCE`].

use std::f32::consts::TAU;

use ndarray::{Array1, Array2, s};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{Result, SimulationError};
use super::vector::Vector2;

/// Smallest magnitude of a sampled force.
pub const MIN_FORCE: f32 = 0.1;
/// Largest magnitude of a sampled force.
pub const MAX_FORCE: f32 = 1.0;

/// Ordered sequence of forces, one per tick of an entity's life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Gene matrix with shape `(len, 2)`.
    genes: Array2<f32>,
}

impl Genome {
    /// Creates a genome of `length` random forces.
    pub fn create(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "genome length must be positive".to_string(),
            ));
        }

        let angles = Array1::random(length, Uniform::new(0.0, TAU));
        let magnitudes = Array1::random(length, Uniform::new_inclusive(MIN_FORCE, MAX_FORCE));

        let mut genes = Array2::zeros((length, 2));
        genes
            .column_mut(0)
            .assign(&(angles.mapv(f32::cos) * &magnitudes));
        genes
            .column_mut(1)
            .assign(&(angles.mapv(f32::sin) * &magnitudes));

        Ok(Self { genes })
    }

    /// Builds a genome from explicit forces.
    pub fn from_genes(genes: &[Vector2]) -> Result<Self> {
        if genes.is_empty() {
            return Err(SimulationError::InvalidConfiguration(
                "genome length must be positive".to_string(),
            ));
        }
        let flat: Vec<f32> = genes.iter().flat_map(|g| [g.x, g.y]).collect();
        let genes = Array2::from_shape_vec((genes.len(), 2), flat)
            .map_err(|e| SimulationError::InvalidConfiguration(e.to_string()))?;
        Ok(Self { genes })
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.nrows()
    }

    /// Always `false` for a genome built through [`Genome::create`].
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the force at `index`, if any.
    pub fn gene(&self, index: usize) -> Option<Vector2> {
        (index < self.len()).then(|| Vector2::new(self.genes[[index, 0]], self.genes[[index, 1]]))
    }

    /// Iterates over all forces in order.
    pub fn genes(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.genes.rows().into_iter().map(|row| Vector2::new(row[0], row[1]))
    }

    /// Overwrites the gene at `index` with a freshly sampled force.
    pub fn regenerate_gene(&mut self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(SimulationError::GeneIndexOutOfRange { index, len });
        }
        let force = random_force(&mut rand::rng());
        self.set(index, force);
        Ok(())
    }

    /// Regenerates each gene independently with probability `rate`.
    ///
    /// Returns the number of regenerated genes.
    pub fn mutate(&mut self, rate: f32) -> usize {
        let probability = f64::from(rate.clamp(0.0, 1.0));
        let mut rng = rand::rng();
        let mut mutated = 0;
        for index in 0..self.len() {
            if rng.random_bool(probability) {
                let force = random_force(&mut rng);
                self.set(index, force);
                mutated += 1;
            }
        }
        mutated
    }

    /// Single-point crossover.
    ///
    /// Genes `[0, split)` come from `parent_a` and `[split, length)` from
    /// `parent_b`. A parent shorter than `length` cannot supply its tail, so
    /// those positions are sampled fresh.
    pub fn crossover(parent_a: &Genome, parent_b: &Genome, split: usize, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "genome length must be positive".to_string(),
            ));
        }
        let split = split.min(length);
        let mut child = Self {
            genes: Array2::zeros((length, 2)),
        };

        let from_a = split.min(parent_a.len());
        child
            .genes
            .slice_mut(s![..from_a, ..])
            .assign(&parent_a.genes.slice(s![..from_a, ..]));

        let until_b = length.min(parent_b.len()).max(split);
        if until_b > split {
            child
                .genes
                .slice_mut(s![split..until_b, ..])
                .assign(&parent_b.genes.slice(s![split..until_b, ..]));
        }

        let mut rng = rand::rng();
        for index in (from_a..split).chain(until_b..length) {
            child.set(index, random_force(&mut rng));
        }

        Ok(child)
    }

    fn set(&mut self, index: usize, force: Vector2) {
        self.genes[[index, 0]] = force.x;
        self.genes[[index, 1]] = force.y;
    }
}

/// Samples one force with the genome's distribution.
pub fn random_force<R: Rng>(rng: &mut R) -> Vector2 {
    let angle = rng.random_range(0.0..TAU);
    let magnitude = rng.random_range(MIN_FORCE..=MAX_FORCE);
    Vector2::from_polar(angle, magnitude)
}
