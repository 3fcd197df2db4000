use super::{Chromosome, CoordinateCodec, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::instrument;

/// Shape of a chromosome: how many antennas it places and how each axis is encoded.
///
/// Fields are laid out as antenna 0 X, antenna 0 Y, antenna 1 X, antenna 1 Y, and so on,
/// each `bits` wide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Morphology {
    pub(crate) antenna_count: usize,
    pub(crate) x: CoordinateCodec,
    pub(crate) y: CoordinateCodec,
}

impl Morphology {
    #[instrument(level = "debug", fields(antenna_count = antenna_count, bits = x.bits()))]
    pub fn new(antenna_count: usize, x: CoordinateCodec, y: CoordinateCodec) -> Self {
        debug_assert_eq!(x.bits(), y.bits());

        Self {
            antenna_count,
            x,
            y,
        }
    }

    pub fn antenna_count(&self) -> usize {
        self.antenna_count
    }

    pub fn bits_per_coordinate(&self) -> usize {
        self.x.bits() as usize
    }

    pub fn chromosome_length(&self) -> usize {
        self.antenna_count * 2 * self.bits_per_coordinate()
    }

    fn x_field(&self, antenna: usize) -> Range<usize> {
        let start = antenna * 2 * self.bits_per_coordinate();
        start..start + self.bits_per_coordinate()
    }

    fn y_field(&self, antenna: usize) -> Range<usize> {
        let start = (antenna * 2 + 1) * self.bits_per_coordinate();
        start..start + self.bits_per_coordinate()
    }

    /// Uniformly random chromosome, each bit set with probability one half.
    #[instrument(level = "debug", skip(self, rng), fields(chromosome_length = self.chromosome_length()))]
    pub fn random<R: Rng>(&self, rng: &mut R) -> Chromosome {
        Chromosome::new(
            (0..self.chromosome_length())
                .map(|_| rng.random_bool(0.5))
                .collect(),
        )
    }

    /// Decodes the antenna positions a chromosome describes.
    pub fn decode(&self, chromosome: &Chromosome) -> Vec<Position> {
        debug_assert_eq!(chromosome.len(), self.chromosome_length());

        (0..self.antenna_count)
            .map(|antenna| {
                Position::new(
                    self.x.decode(&chromosome.genes[self.x_field(antenna)]),
                    self.y.decode(&chromosome.genes[self.y_field(antenna)]),
                )
            })
            .collect()
    }

    /// Encodes antenna positions, clamping each coordinate into the plane.
    ///
    /// Missing antennas are encoded as all-zero fields and surplus positions are ignored.
    pub fn encode(&self, positions: &[Position]) -> Chromosome {
        let mut chromosome = Chromosome::zeroed(self.chromosome_length());

        for (antenna, position) in positions.iter().take(self.antenna_count).enumerate() {
            let x_field = self.x_field(antenna);
            let y_field = self.y_field(antenna);
            self.x
                .encode_into(position.x, &mut chromosome.genes[x_field]);
            self.y
                .encode_into(position.y, &mut chromosome.genes[y_field]);
        }

        chromosome
    }
}
