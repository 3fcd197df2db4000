use crate::models::Individual;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ============================================================
// MutationRate
// ============================================================
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(try_from = "f64", into = "f64")]
pub struct MutationRate {
    value: f64,
}

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
#[error("mutation_rate must be between 0.0 and 1.0, got: {0}")]
pub struct MutationRateOutOfRange(pub(crate) f64);

impl MutationRate {
    pub fn new(value: f64) -> Result<Self, MutationRateOutOfRange> {
        if !(0.0..=1.0).contains(&value) {
            return Err(MutationRateOutOfRange(value));
        }

        Ok(Self { value })
    }

    pub fn get(&self) -> f64 {
        self.value
    }
}

impl TryFrom<f64> for MutationRate {
    type Error = MutationRateOutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MutationRate> for f64 {
    fn from(rate: MutationRate) -> Self {
        rate.value
    }
}

// ============================================================
// Mutagen
// ============================================================

/// Bit-flip mutation: every gene is flipped independently with the mutation rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Mutagen {
    mutation_rate: MutationRate,
}

impl Mutagen {
    pub fn new(mutation_rate: MutationRate) -> Self {
        Self { mutation_rate }
    }

    pub fn constant(mutation_rate: f64) -> Result<Self, MutationRateOutOfRange> {
        Ok(Self::new(MutationRate::new(mutation_rate)?))
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate.get()
    }

    /// Flips genes in place. The cached fitness is discarded when at least one gene flips.
    #[instrument(level = "trace", skip(self, rng, individual), fields(mutation_rate = self.mutation_rate.get()))]
    pub fn mutate<R: Rng>(&self, rng: &mut R, individual: &mut Individual) {
        let rate = self.mutation_rate.get();
        let flips: Vec<usize> = (0..individual.chromosome().len())
            .filter(|_| rng.random_bool(rate))
            .collect();

        if flips.is_empty() {
            return;
        }

        let chromosome = individual.chromosome_mut();
        for index in flips {
            chromosome.flip(index);
        }
    }
}
