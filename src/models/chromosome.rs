use serde::{Deserialize, Serialize};
use std::fmt;

/// The binary genome of one individual.
///
/// Serializes as a string of `0` and `1` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Chromosome {
    pub(crate) genes: Vec<bool>,
}

#[derive(Debug, thiserror::Error)]
#[error("chromosome strings may only contain '0' and '1', found {found:?} at position {position}")]
pub struct ChromosomeParseError {
    found: char,
    position: usize,
}

impl Chromosome {
    pub fn new(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    pub fn zeroed(length: usize) -> Self {
        Self::new(vec![false; length])
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub(crate) fn flip(&mut self, index: usize) {
        self.genes[index] = !self.genes[index];
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &gene in &self.genes {
            f.write_str(if gene { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl From<Chromosome> for String {
    fn from(chromosome: Chromosome) -> Self {
        chromosome.to_string()
    }
}

impl TryFrom<String> for Chromosome {
    type Error = ChromosomeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for Chromosome {
    type Err = ChromosomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, found)| match found {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ChromosomeParseError { found, position }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}
