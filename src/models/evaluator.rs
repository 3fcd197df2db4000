use super::{Chromosome, Client, Fitness, Morphology, count_covered};
use tracing::instrument;

/// Objective function scoring a chromosome. Higher is better.
///
/// Implementations only read shared state, so a population may be scored from several threads.
pub trait Evaluator {
    fn fitness(&self, chromosome: &Chromosome) -> Fitness;
}

/// Scores a chromosome by the number of clients its decoded antennas cover.
#[derive(Debug)]
pub struct CoverageEvaluator<'a> {
    morphology: &'a Morphology,
    radius: f64,
    clients: &'a [Client],
}

impl<'a> CoverageEvaluator<'a> {
    pub fn new(morphology: &'a Morphology, radius: f64, clients: &'a [Client]) -> Self {
        Self {
            morphology,
            radius,
            clients,
        }
    }
}

impl Evaluator for CoverageEvaluator<'_> {
    #[instrument(level = "trace", skip(self, chromosome), fields(antenna_count = self.morphology.antenna_count(), clients = self.clients.len()))]
    fn fitness(&self, chromosome: &Chromosome) -> Fitness {
        let antennas = self.morphology.decode(chromosome);
        count_covered(&antennas, self.radius, self.clients)
    }
}
