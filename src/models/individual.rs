use super::{Chromosome, Evaluator, Fitness};
use serde::{Deserialize, Serialize};

/// A chromosome together with its cached fitness.
///
/// The cache is cleared whenever the chromosome is borrowed mutably, so a stale score is
/// never observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    chromosome: Chromosome,
    fitness: Option<Fitness>,
}

impl Individual {
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: None,
        }
    }

    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Mutable access to the genome. Invalidates the cached fitness.
    pub fn chromosome_mut(&mut self) -> &mut Chromosome {
        self.fitness = None;
        &mut self.chromosome
    }

    pub fn fitness(&self) -> Option<Fitness> {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Scores the chromosome unless a valid score is already cached.
    pub fn evaluate<E: Evaluator + ?Sized>(&mut self, evaluator: &E) -> Fitness {
        match self.fitness {
            Some(fitness) => fitness,
            None => {
                let fitness = evaluator.fitness(&self.chromosome);
                self.fitness = Some(fitness);
                fitness
            }
        }
    }

    pub fn into_chromosome(self) -> Chromosome {
        self.chromosome
    }
}
