//! Fixed-width binary encoding of bounded real coordinates.
//!
//! A coordinate in `[lower, upper]` is quantized to one of `2^bits` evenly spaced levels and
//! stored most-significant bit first. Decoding is total: every bit pattern maps back to a value
//! inside the bounds.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Widest supported coordinate field. Levels are computed in `u64`.
pub const MAX_BITS_PER_COORDINATE: u32 = 32;

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum CodecError {
    #[error(
        "InvalidBounds: bounds must be finite and lower must not exceed upper. lower={lower}, upper={upper}"
    )]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("SpanOverflow: upper - lower is not representable. lower={lower}, upper={upper}")]
    SpanOverflow { lower: f64, upper: f64 },
    #[error("InvalidWidth: bits per coordinate must be between 1 and {max}, got {bits}")]
    InvalidWidth { bits: u32, max: u32 },
}

impl CodecError {
    pub(crate) fn invalid_bounds(lower: f64, upper: f64) -> Self {
        Self::InvalidBounds { lower, upper }
    }

    pub(crate) fn invalid_width(bits: u32) -> Self {
        Self::InvalidWidth {
            bits,
            max: MAX_BITS_PER_COORDINATE,
        }
    }
}

/// Maps one axis of the plane onto a `bits`-wide unsigned integer field.
///
/// Deserialization goes through [`CoordinateCodec::new`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(try_from = "CodecParams")]
pub struct CoordinateCodec {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    pub(crate) bits: u32,
}

#[derive(Deserialize)]
struct CodecParams {
    lower: f64,
    upper: f64,
    bits: u32,
}

impl TryFrom<CodecParams> for CoordinateCodec {
    type Error = CodecError;

    fn try_from(params: CodecParams) -> Result<Self, Self::Error> {
        Self::new(params.lower, params.upper, params.bits)
    }
}

impl CoordinateCodec {
    #[instrument(level = "debug", fields(lower = lower, upper = upper, bits = bits))]
    pub fn new(lower: f64, upper: f64, bits: u32) -> Result<Self, CodecError> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(CodecError::invalid_bounds(lower, upper));
        }

        if !(upper - lower).is_finite() {
            return Err(CodecError::SpanOverflow { lower, upper });
        }

        if bits == 0 || bits > MAX_BITS_PER_COORDINATE {
            return Err(CodecError::invalid_width(bits));
        }

        Ok(Self { lower, upper, bits })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Highest representable level, `2^bits - 1`.
    pub fn max_level(&self) -> u64 {
        (1u64 << self.bits) - 1
    }

    /// Distance between two adjacent representable values.
    pub fn step(&self) -> f64 {
        (self.upper - self.lower) / self.max_level() as f64
    }

    /// Nearest level for `value`, clamping out-of-bounds input first.
    pub fn to_level(&self, value: f64) -> u64 {
        let span = self.upper - self.lower;
        if span == 0.0 || value.is_nan() {
            return 0;
        }

        let normalized = (value.clamp(self.lower, self.upper) - self.lower) / span;
        let max = self.max_level();
        ((normalized * max as f64).round() as u64).min(max)
    }

    /// Linear rescale of a level back into `[lower, upper]`.
    pub fn from_level(&self, level: u64) -> f64 {
        let level = level.min(self.max_level()) as f64;
        let max = self.max_level() as f64;
        let span = self.upper - self.lower;
        // multiply first for exact results on small spans, divide first near f64::MAX
        let scaled = span * level;
        let offset = if scaled.is_finite() {
            scaled / max
        } else {
            span * (level / max)
        };
        (self.lower + offset).clamp(self.lower, self.upper)
    }

    /// Writes the encoding of `value` into `field`, most significant bit first.
    ///
    /// `field` is expected to be exactly `bits` long; shorter fields keep the low-order bits.
    pub fn encode_into(&self, value: f64, field: &mut [bool]) {
        let level = self.to_level(value);
        let width = field.len();
        for (offset, bit) in field.iter_mut().enumerate() {
            let shift = width - 1 - offset;
            *bit = shift < 64 && (level >> shift) & 1 == 1;
        }
    }

    pub fn encode(&self, value: f64) -> Vec<bool> {
        let mut field = vec![false; self.bits as usize];
        self.encode_into(value, &mut field);
        field
    }

    pub fn decode(&self, field: &[bool]) -> f64 {
        let level = field
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit));
        self.from_level(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn it_rejects_invalid_bounds() {
        assert_eq!(
            CoordinateCodec::new(10.0, 0.0, 8).unwrap_err(),
            CodecError::invalid_bounds(10.0, 0.0)
        );
        assert!(CoordinateCodec::new(f64::NAN, 1.0, 8).is_err());
        assert!(CoordinateCodec::new(0.0, f64::INFINITY, 8).is_err());
    }

    #[test]
    fn it_rejects_bounds_with_overflowing_span() {
        assert_eq!(
            CoordinateCodec::new(-1.0e308, 1.0e308, 8).unwrap_err(),
            CodecError::SpanOverflow {
                lower: -1.0e308,
                upper: 1.0e308
            }
        );
        assert!(CoordinateCodec::new(-1.0e307, 1.0e307, 8).is_ok());
    }

    #[test]
    fn it_decodes_wide_bounds_inside_the_bounds() {
        let codec = CoordinateCodec::new(-1.0e307, 1.0e307, 8).unwrap();

        for level in [0u64, 1, 128, 255] {
            let value = codec.from_level(level);
            assert!(value.is_finite() && (-1.0e307..=1.0e307).contains(&value));
        }
    }

    #[test]
    fn it_validates_when_deserializing() {
        let codec: CoordinateCodec =
            serde_json::from_str(r#"{ "lower": 0.0, "upper": 10.0, "bits": 4 }"#).unwrap();
        assert_eq!(codec, CoordinateCodec::new(0.0, 10.0, 4).unwrap());

        for json in [
            r#"{ "lower": 0.0, "upper": 10.0, "bits": 0 }"#,
            r#"{ "lower": 0.0, "upper": 10.0, "bits": 64 }"#,
            r#"{ "lower": 10.0, "upper": 0.0, "bits": 4 }"#,
            r#"{ "lower": -1e308, "upper": 1e308, "bits": 4 }"#,
        ] {
            assert!(serde_json::from_str::<CoordinateCodec>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn it_rejects_invalid_width() {
        assert_eq!(
            CoordinateCodec::new(0.0, 1.0, 0).unwrap_err(),
            CodecError::invalid_width(0)
        );
        assert!(CoordinateCodec::new(0.0, 1.0, 33).is_err());
        assert!(CoordinateCodec::new(0.0, 1.0, 32).is_ok());
    }

    #[test]
    fn it_encodes_most_significant_bit_first() {
        let codec = CoordinateCodec::new(0.0, 15.0, 4).unwrap();

        assert_eq!(codec.encode(0.0), vec![false, false, false, false]);
        assert_eq!(codec.encode(1.0), vec![false, false, false, true]);
        assert_eq!(codec.encode(8.0), vec![true, false, false, false]);
        assert_eq!(codec.encode(15.0), vec![true, true, true, true]);
    }

    #[test]
    fn it_clamps_out_of_bounds_values() {
        let codec = CoordinateCodec::new(0.0, 10.0, 6).unwrap();

        assert_eq!(codec.encode(-5.0), codec.encode(0.0));
        assert_eq!(codec.encode(25.0), codec.encode(10.0));
    }

    #[test]
    fn it_decodes_extremes_to_bounds() {
        let codec = CoordinateCodec::new(-3.0, 7.0, 10).unwrap();

        assert_eq!(codec.decode(&[false; 10]), -3.0);
        assert_eq!(codec.decode(&[true; 10]), 7.0);
    }

    #[test]
    fn it_round_trips_within_one_step() {
        let mut rng = StdRng::seed_from_u64(7);

        for bits in [1, 3, 10, 16, 32] {
            let codec = CoordinateCodec::new(-250.0, 1000.0, bits).unwrap();
            for _ in 0..200 {
                let value = rng.random_range(-250.0..=1000.0);
                let decoded = codec.decode(&codec.encode(value));
                assert!(
                    (decoded - value).abs() <= codec.step(),
                    "bits={bits} value={value} decoded={decoded}"
                );
            }
        }
    }

    #[test]
    fn it_handles_degenerate_bounds() {
        let codec = CoordinateCodec::new(4.0, 4.0, 5).unwrap();

        assert_eq!(codec.to_level(100.0), 0);
        assert_eq!(codec.decode(&[true; 5]), 4.0);
    }
}
