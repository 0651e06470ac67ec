use thiserror::Error;

/// Errors raised by the simulation core.
///
/// None of these leave a [`Population`](super::population::Population) in a
/// partially updated state: the failing operation is refused as a whole.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A configuration value is out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Reproduction was requested without a mating pool to draw parents from.
    #[error("mating pool is empty, evaluate the generation before reproducing")]
    EmptyMatingPool,
    /// A goal or obstacle with no usable area.
    #[error("degenerate {shape}: width={width}, height={height}")]
    DegenerateGeometry {
        /// Shape kind, `"goal"` or `"obstacle"`.
        shape: &'static str,
        /// Rejected width.
        width: f32,
        /// Rejected height.
        height: f32,
    },
    /// A gene index past the end of the genome.
    #[error("gene index {index} out of range for genome of length {len}")]
    GeneIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Genome length.
        len: usize,
    },
    /// Reading a configuration file failed.
    #[error("ConfigIo: {0}")]
    ConfigIo(#[from] std::io::Error),
    /// A configuration file is not valid JSON for the expected schema.
    #[error("ConfigFormat: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

/// Shorthand for results produced by the simulation core.
pub type Result<T> = std::result::Result<T, SimulationError>;
