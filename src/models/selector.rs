//! Fitness-proportionate parent selection.
//!
//! Each parent slot spins a roulette wheel whose sectors are as wide as the individuals'
//! fitness values. The wheel is laid out in population order, and the selected individual is
//! the first one whose running fitness total exceeds the spin. Individuals with zero fitness
//! therefore occupy no space on the wheel and are never picked while anyone scores above zero.
//!
//! When the whole population scores zero there is no wheel to spin, and selection falls back to
//! a uniform draw over the population.
//!
//! Fitness values are integers, so spins are drawn as integers in `[0, total)`. This gives the
//! same distribution as a real-valued draw while keeping the accumulation exact.

use crate::models::{Individual, Population};
use rand::Rng;
use tracing::instrument;

/// Walks the wheel and returns the index of the sector containing `spin`.
fn spin_roulette(fitnesses: impl IntoIterator<Item = u64>, spin: u64) -> Option<usize> {
    let mut cumulative = 0u64;

    for (index, fitness) in fitnesses.into_iter().enumerate() {
        cumulative += fitness;
        if cumulative > spin {
            return Some(index);
        }
    }

    None
}


/// Errors that can occur during parent selection.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum SelectionError {
    /// The population holds no individuals to select from.
    #[error("No valid parents available for selection")]
    NoValidParents,

    /// Internal roulette wheel failure.
    ///
    /// The spin is always drawn below the wheel's total, so this indicates a bug.
    #[error("Internal error: roulette wheel failed to select candidate")]
    RouletteSelectionFailed,
}

/// Roulette-wheel selector over a snapshot of one generation.
///
/// The selector borrows the population, so fitness values cannot change while a generation's
/// parents are being drawn.
#[derive(Debug)]
pub struct Selector<'a> {
    population: &'a Population,
    total_fitness: u64,
}

impl<'a> Selector<'a> {
    #[instrument(level = "debug", skip(population), fields(size = population.len()))]
    pub fn roulette(population: &'a Population) -> Result<Self, SelectionError> {
        if population.is_empty() {
            return Err(SelectionError::NoValidParents);
        }

        Ok(Self {
            population,
            total_fitness: population.total_fitness(),
        })
    }

    pub fn total_fitness(&self) -> u64 {
        self.total_fitness
    }

    /// Index of one parent, drawn proportionally to fitness.
    pub fn select_index<R: Rng>(&self, rng: &mut R) -> Result<usize, SelectionError> {
        if self.total_fitness == 0 {
            return Ok(rng.random_range(0..self.population.len()));
        }

        let spin = rng.random_range(0..self.total_fitness);
        let fitnesses = (0..self.population.len())
            .map(|index| u64::from(self.population.fitness_of(index)));

        spin_roulette(fitnesses, spin).ok_or(SelectionError::RouletteSelectionFailed)
    }

    pub fn select<R: Rng>(&self, rng: &mut R) -> Result<&'a Individual, SelectionError> {
        let index = self.select_index(rng)?;
        Ok(&self.population.individuals()[index])
    }
}
