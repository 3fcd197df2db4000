use super::{Evaluator, Fitness, Individual, Morphology};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

/// The individuals of one generation, in a fixed order.
///
/// Ranking is by descending fitness with ties resolved by position: whenever two individuals
/// score the same, the one with the lower index ranks first.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Builds `size` individuals with uniformly random chromosomes.
    #[instrument(level = "debug", skip(morphology, rng), fields(size = size, chromosome_length = morphology.chromosome_length()))]
    pub fn random<R: Rng>(size: usize, morphology: &Morphology, rng: &mut R) -> Self {
        Self::new(
            (0..size)
                .map(|_| Individual::new(morphology.random(rng)))
                .collect(),
        )
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Scores every individual lacking a cached fitness.
    #[instrument(level = "debug", skip(self, evaluator), fields(size = self.individuals.len()))]
    pub fn evaluate<E: Evaluator + Sync>(&mut self, evaluator: &E) {
        #[cfg(feature = "parallel")]
        self.individuals
            .par_iter_mut()
            .filter(|individual| !individual.is_evaluated())
            .for_each(|individual| {
                individual.evaluate(evaluator);
            });

        #[cfg(not(feature = "parallel"))]
        self.individuals
            .iter_mut()
            .filter(|individual| !individual.is_evaluated())
            .for_each(|individual| {
                individual.evaluate(evaluator);
            });
    }

    /// Fitness used for ranking and selection. Unscored individuals count as zero.
    pub(crate) fn fitness_of(&self, index: usize) -> Fitness {
        self.individuals[index].fitness().unwrap_or(0)
    }

    pub fn total_fitness(&self) -> u64 {
        (0..self.len())
            .map(|index| u64::from(self.fitness_of(index)))
            .sum()
    }

    /// Indices ordered from best to worst.
    pub fn ranked(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        // Stable sort keeps the original order among equal scores.
        indices.sort_by(|&a, &b| self.fitness_of(b).cmp(&self.fitness_of(a)));
        indices
    }

    /// The highest scoring individual, earliest index on ties.
    pub fn best(&self) -> Option<&Individual> {
        let mut best: Option<usize> = None;
        for index in 0..self.len() {
            match best {
                Some(current) if self.fitness_of(index) <= self.fitness_of(current) => {}
                _ => best = Some(index),
            }
        }
        best.map(|index| &self.individuals[index])
    }

    /// Copies of the `count` best individuals, in rank order.
    pub fn elites(&self, count: usize) -> Vec<Individual> {
        self.ranked()
            .into_iter()
            .take(count)
            .map(|index| self.individuals[index].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chromosome, CoordinateCodec};
    use rand::{SeedableRng, rngs::StdRng};

    struct OnesEvaluator;

    impl Evaluator for OnesEvaluator {
        fn fitness(&self, chromosome: &Chromosome) -> Fitness {
            chromosome.genes().iter().filter(|&&gene| gene).count() as Fitness
        }
    }

    fn create_test_population(genomes: &[&str]) -> Population {
        let mut population = Population::new(
            genomes
                .iter()
                .map(|genome| Individual::new(genome.parse().unwrap()))
                .collect(),
        );
        population.evaluate(&OnesEvaluator);
        population
    }

    #[test]
    fn it_builds_random_populations() {
        let mut rng = StdRng::seed_from_u64(42);
        let morphology = Morphology::new(
            2,
            CoordinateCodec::new(0.0, 1.0, 5).unwrap(),
            CoordinateCodec::new(0.0, 1.0, 5).unwrap(),
        );

        let population = Population::random(12, &morphology, &mut rng);

        assert_eq!(population.len(), 12);
        assert!(
            population
                .individuals()
                .iter()
                .all(|individual| individual.chromosome().len() == 20 && !individual.is_evaluated())
        );
    }

    #[test]
    fn it_evaluates_every_individual() {
        let population = create_test_population(&["000", "110", "111"]);

        let scores: Vec<_> = population
            .individuals()
            .iter()
            .map(Individual::fitness)
            .collect();
        assert_eq!(scores, vec![Some(0), Some(2), Some(3)]);
        assert_eq!(population.total_fitness(), 5);
    }

    #[test]
    fn it_ranks_with_stable_tie_break() {
        let population = create_test_population(&["100", "110", "010", "011", "000"]);

        assert_eq!(population.ranked(), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn it_picks_earliest_best() {
        let population = create_test_population(&["100", "110", "011"]);

        let best = population.best().unwrap();
        assert_eq!(best.chromosome().to_string(), "110");
    }

    #[test]
    fn it_copies_elites_in_rank_order() {
        let population = create_test_population(&["100", "111", "010", "110"]);

        let elites = population.elites(2);

        assert_eq!(elites.len(), 2);
        assert_eq!(elites[0], population.individuals()[1]);
        assert_eq!(elites[1], population.individuals()[3]);
    }

    #[test]
    fn it_has_no_best_when_empty() {
        assert!(Population::new(Vec::new()).best().is_none());
    }
}
