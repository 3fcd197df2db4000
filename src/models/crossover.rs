use crate::models::Chromosome;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Swaps the segment `[first, second)` between two genomes.
#[instrument(level = "trace", skip(lhs, rhs), fields(chromosome_length = lhs.len(), first = first, second = second))]
fn crossover_two_point(
    lhs: &Chromosome,
    rhs: &Chromosome,
    first: usize,
    second: usize,
) -> (Chromosome, Chromosome) {
    let lhs_genes = lhs.genes();
    let rhs_genes = rhs.genes();
    let mut lhs_child = Vec::with_capacity(lhs_genes.len());
    let mut rhs_child = Vec::with_capacity(rhs_genes.len());

    lhs_child.extend_from_slice(&lhs_genes[..first]);
    lhs_child.extend_from_slice(&rhs_genes[first..second]);
    lhs_child.extend_from_slice(&lhs_genes[second..]);

    rhs_child.extend_from_slice(&rhs_genes[..first]);
    rhs_child.extend_from_slice(&lhs_genes[first..second]);
    rhs_child.extend_from_slice(&rhs_genes[second..]);

    (Chromosome::new(lhs_child), Chromosome::new(rhs_child))
}

/// Two distinct cut points from `[1, length - 1]`, in ascending order.
fn cut_points<R: Rng>(rng: &mut R, length: usize) -> (usize, usize) {
    let sampled = index::sample(rng, length - 1, 2);
    let (a, b) = (sampled.index(0) + 1, sampled.index(1) + 1);
    (a.min(b), a.max(b))
}

/// Two-point recombination applied with a fixed probability.
///
/// With probability `probability` two distinct cut points are drawn and the middle segments of
/// the parents are exchanged. Otherwise both children are copies of their parents. Chromosomes
/// shorter than three genes have no pair of distinct inner cut points and are always copied.
///
/// # Examples
///
/// ```rust
/// use antenna_ga::models::Crossover;
///
/// let crossover = Crossover::two_point(0.5)?;
///
/// // Probabilities outside [0, 1] are rejected
/// assert!(Crossover::two_point(1.5).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(try_from = "CrossoverParams")]
pub struct Crossover {
    probability: f64,
}

#[derive(Deserialize)]
struct CrossoverParams {
    probability: f64,
}

impl TryFrom<CrossoverParams> for Crossover {
    type Error = ProbabilityOutOfRangeError;

    fn try_from(params: CrossoverParams) -> Result<Self, Self::Error> {
        Self::two_point(params.probability)
    }
}

/// Error returned when a crossover probability lies outside `[0.0, 1.0]`.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
#[error("crossover probability must be between 0.0 and 1.0, got {0}")]
pub struct ProbabilityOutOfRangeError(pub(crate) f64);

impl Crossover {
    pub fn two_point(probability: f64) -> Result<Self, ProbabilityOutOfRangeError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ProbabilityOutOfRangeError(probability));
        }

        Ok(Self { probability })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Produces two children from two equally long parents.
    #[instrument(level = "trace", skip(self, rng, lhs, rhs), fields(probability = self.probability, chromosome_length = lhs.len()))]
    pub fn apply<R: Rng>(
        &self,
        rng: &mut R,
        lhs: &Chromosome,
        rhs: &Chromosome,
    ) -> (Chromosome, Chromosome) {
        debug_assert_eq!(lhs.len(), rhs.len());

        if !rng.random_bool(self.probability) || lhs.len() < 3 {
            return (lhs.clone(), rhs.clone());
        }

        let (first, second) = cut_points(rng, lhs.len());
        crossover_two_point(lhs, rhs, first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn parse(genome: &str) -> Chromosome {
        genome.parse().unwrap()
    }

    #[test]
    fn it_performs_two_point_crossover() {
        let parent_a = parse("00000000");
        let parent_b = parse("11111111");

        let (child_a, child_b) = crossover_two_point(&parent_a, &parent_b, 2, 5);
        assert_eq!(child_a.to_string(), "00111000");
        assert_eq!(child_b.to_string(), "11000111");

        let (child_a, child_b) = crossover_two_point(&parent_a, &parent_b, 1, 7);
        assert_eq!(child_a.to_string(), "01111110");
        assert_eq!(child_b.to_string(), "10000001");
    }

    #[test]
    fn it_draws_distinct_inner_cut_points() {
        let mut rng = StdRng::seed_from_u64(42);

        for length in [3, 4, 10, 80] {
            for _ in 0..200 {
                let (first, second) = cut_points(&mut rng, length);
                assert!(1 <= first && first < second && second <= length - 1);
            }
        }
    }

    #[test]
    fn it_exchanges_one_contiguous_segment() {
        let mut rng = StdRng::seed_from_u64(42);
        let crossover = Crossover::two_point(1.0).unwrap();
        let parent_a = parse("0000000000");
        let parent_b = parse("1111111111");

        for _ in 0..50 {
            let (child_a, child_b) = crossover.apply(&mut rng, &parent_a, &parent_b);
            let a = child_a.to_string();
            let b = child_b.to_string();

            assert_eq!(a.len(), 10);
            assert_eq!(b.len(), 10);
            // Children are complementary
            assert!(a.chars().zip(b.chars()).all(|(x, y)| x != y));
            // Exactly two transitions, never touching either end
            let transitions = a.as_bytes().windows(2).filter(|w| w[0] != w[1]).count();
            assert_eq!(transitions, 2);
            assert!(a.starts_with('0') && a.ends_with('0'));
        }
    }

    #[test]
    fn it_copies_parents_without_crossover() {
        let mut rng = StdRng::seed_from_u64(42);
        let crossover = Crossover::two_point(0.0).unwrap();
        let parent_a = parse("0101");
        let parent_b = parse("1100");

        let (child_a, child_b) = crossover.apply(&mut rng, &parent_a, &parent_b);

        assert_eq!(child_a, parent_a);
        assert_eq!(child_b, parent_b);
    }

    #[test]
    fn it_copies_chromosomes_too_short_to_cut() {
        let mut rng = StdRng::seed_from_u64(42);
        let crossover = Crossover::two_point(1.0).unwrap();
        let parent_a = parse("01");
        let parent_b = parse("10");

        let (child_a, child_b) = crossover.apply(&mut rng, &parent_a, &parent_b);

        assert_eq!(child_a, parent_a);
        assert_eq!(child_b, parent_b);
    }

    #[test]
    fn it_validates_probability_when_deserializing() {
        let crossover: Crossover = serde_json::from_str(r#"{ "probability": 0.7 }"#).unwrap();
        assert_eq!(crossover.probability(), 0.7);

        assert!(serde_json::from_str::<Crossover>(r#"{ "probability": 2.0 }"#).is_err());
        assert!(serde_json::from_str::<Crossover>(r#"{ "probability": -0.5 }"#).is_err());
    }

    #[test]
    fn it_validates_crossover_probability() {
        assert_eq!(
            Crossover::two_point(-0.1).unwrap_err(),
            ProbabilityOutOfRangeError(-0.1)
        );
        assert!(Crossover::two_point(1.5).is_err());
        assert!(Crossover::two_point(f64::NAN).is_err());
        assert!(Crossover::two_point(0.0).is_ok());
        assert!(Crossover::two_point(1.0).is_ok());
    }
}
