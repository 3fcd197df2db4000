mod breeder;
mod chromosome;
mod client;
mod codec;
mod configuration;
mod crossover;
mod evaluator;
mod fitness;
mod individual;
mod morphology;
mod mutagen;
mod population;
mod schedule;
mod selector;

pub use chromosome::{Chromosome, ChromosomeParseError};
pub use client::{Client, Position};
pub use codec::{CodecError, CoordinateCodec, MAX_BITS_PER_COORDINATE};
pub use configuration::{Bounds, Configuration, ConfigurationError};
pub use crossover::{Crossover, ProbabilityOutOfRangeError};
pub use evaluator::{CoverageEvaluator, Evaluator};
pub use fitness::{Fitness, count_covered};
pub use individual::Individual;
pub use morphology::Morphology;
pub use mutagen::{Mutagen, MutationRate, MutationRateOutOfRange};
pub use population::Population;
pub use schedule::{Schedule, ScheduleDecision, StopReason};
pub use selector::{SelectionError, Selector};

pub(crate) use breeder::Breeder;
