use crate::models::{Crossover, Individual, Mutagen, Population, SelectionError, Selector};
use rand::Rng;
use tracing::instrument;

/// Produces offspring for the non-elite slots of the next generation.
pub(crate) struct Breeder<'a> {
    crossover: &'a Crossover,
    mutagen: &'a Mutagen,
}

impl<'a> Breeder<'a> {
    pub(crate) fn new(crossover: &'a Crossover, mutagen: &'a Mutagen) -> Self {
        Self { crossover, mutagen }
    }

    fn breed_pair<R: Rng>(
        &self,
        selector: &Selector<'_>,
        rng: &mut R,
    ) -> Result<(Individual, Individual), SelectionError> {
        let parent1 = selector.select(rng)?;
        let parent2 = selector.select(rng)?;

        let (genome1, genome2) =
            self.crossover
                .apply(rng, parent1.chromosome(), parent2.chromosome());
        let mut child1 = Individual::new(genome1);
        let mut child2 = Individual::new(genome2);

        self.mutagen.mutate(rng, &mut child1);
        self.mutagen.mutate(rng, &mut child2);

        Ok((child1, child2))
    }

    /// Breeds exactly `count` children from `population`.
    ///
    /// Children come in pairs; when `count` is odd the second child of the last pair is dropped.
    #[instrument(level = "debug", skip(self, population, rng), fields(count = count, population_size = population.len()))]
    pub(crate) fn breed_batch<R: Rng>(
        &self,
        population: &Population,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Individual>, SelectionError> {
        let selector = Selector::roulette(population)?;
        let mut offspring = Vec::with_capacity(count + 1);

        while offspring.len() < count {
            let (child1, child2) = self.breed_pair(&selector, rng)?;
            offspring.push(child1);
            if offspring.len() < count {
                offspring.push(child2);
            }
        }

        Ok(offspring)
    }
}
