use super::{
    CodecError, CoordinateCodec, Crossover, Morphology, Mutagen, MutationRateOutOfRange,
    ProbabilityOutOfRangeError, Schedule,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Rectangular region antennas may be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// A `width` × `height` map anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, width, 0.0, height)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_size(1000.0, 1000.0)
    }
}

/// Every parameter of one optimization run.
///
/// The configuration is an immutable value handed to the engine, so several runs with
/// different settings can share a process. Missing fields fall back to [`Configuration::default`]
/// when deserializing.
///
/// # Examples
///
/// ```rust
/// use antenna_ga::models::Configuration;
///
/// let configuration = Configuration {
///     antenna_count: 2,
///     population_size: 40,
///     seed: Some(7),
///     ..Configuration::default()
/// };
///
/// assert!(configuration.validate().is_ok());
/// assert_eq!(configuration.chromosome_length(), 40);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub antenna_count: u32,
    pub antenna_radius: f64,
    pub bounds: Bounds,
    pub bits_per_coordinate: u32,
    pub population_size: u32,
    pub max_generations: u32,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub elitism_count: u32,
    pub max_stagnant_generations: u32,
    pub seed: Option<u64>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            antenna_count: 4,
            antenna_radius: 100.0,
            bounds: Bounds::default(),
            bits_per_coordinate: 10,
            population_size: 100,
            max_generations: 1000,
            crossover_rate: 0.5,
            mutation_rate: 0.05,
            elitism_count: 10,
            max_stagnant_generations: 50,
            seed: None,
        }
    }
}

/// A configuration value that cannot drive a run.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ConfigurationError {
    #[error("antenna_count must be at least 1, got {0}")]
    AntennaCount(u32),
    #[error("antenna_radius must be finite and greater than 0, got {0}")]
    AntennaRadius(f64),
    #[error("population_size must be at least 2, got {0}")]
    PopulationSize(u32),
    #[error("max_generations must be at least 1, got {0}")]
    MaxGenerations(u32),
    #[error("max_stagnant_generations must be at least 1, got {0}")]
    MaxStagnantGenerations(u32),
    #[error(
        "elitism_count must be smaller than population_size. elitism_count={elitism_count}, population_size={population_size}"
    )]
    ElitismCount {
        elitism_count: u32,
        population_size: u32,
    },
    #[error("Invalid {axis} axis: {source}")]
    Axis {
        axis: &'static str,
        #[source]
        source: CodecError,
    },
    #[error("Crossover error: {0}")]
    CrossoverRate(#[from] ProbabilityOutOfRangeError),
    #[error("Mutation rate error: {0}")]
    MutationRate(#[from] MutationRateOutOfRange),
}

impl Configuration {
    /// Checks every constraint, reporting the first violation.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.antenna_count < 1 {
            return Err(ConfigurationError::AntennaCount(self.antenna_count));
        }

        if !self.antenna_radius.is_finite() || self.antenna_radius <= 0.0 {
            return Err(ConfigurationError::AntennaRadius(self.antenna_radius));
        }

        if self.population_size < 2 {
            return Err(ConfigurationError::PopulationSize(self.population_size));
        }

        if self.elitism_count >= self.population_size {
            return Err(ConfigurationError::ElitismCount {
                elitism_count: self.elitism_count,
                population_size: self.population_size,
            });
        }

        if self.max_generations < 1 {
            return Err(ConfigurationError::MaxGenerations(self.max_generations));
        }

        if self.max_stagnant_generations < 1 {
            return Err(ConfigurationError::MaxStagnantGenerations(
                self.max_stagnant_generations,
            ));
        }

        self.morphology()?;
        self.crossover()?;
        self.mutagen()?;

        Ok(())
    }

    pub fn chromosome_length(&self) -> usize {
        self.antenna_count as usize * 2 * self.bits_per_coordinate as usize
    }

    pub fn morphology(&self) -> Result<Morphology, ConfigurationError> {
        let x = CoordinateCodec::new(
            self.bounds.min_x,
            self.bounds.max_x,
            self.bits_per_coordinate,
        )
        .map_err(|source| ConfigurationError::Axis { axis: "x", source })?;
        let y = CoordinateCodec::new(
            self.bounds.min_y,
            self.bounds.max_y,
            self.bits_per_coordinate,
        )
        .map_err(|source| ConfigurationError::Axis { axis: "y", source })?;

        Ok(Morphology::new(self.antenna_count as usize, x, y))
    }

    pub fn crossover(&self) -> Result<Crossover, ConfigurationError> {
        Ok(Crossover::two_point(self.crossover_rate)?)
    }

    pub fn mutagen(&self) -> Result<Mutagen, ConfigurationError> {
        Ok(Mutagen::constant(self.mutation_rate)?)
    }

    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.max_generations, self.max_stagnant_generations)
    }
}
