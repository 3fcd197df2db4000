use crate::models::{Chromosome, Fitness, Position, StopReason};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal conditions detected during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunWarning {
    /// No clients were supplied, so every placement scores zero.
    EmptyInput,
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::EmptyInput => f.write_str("no clients supplied, every placement covers 0"),
        }
    }
}

/// Outcome of a finished run: the best individual ever seen plus run statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub best_chromosome: Chromosome,
    pub best_fitness: Fitness,
    /// Decoded from `best_chromosome`.
    pub antenna_positions: Vec<Position>,
    /// Generations bred after the initial population.
    pub generations_run: u32,
    pub stopped_reason: StopReason,
    pub client_count: usize,
    /// Seed the run was driven by. Reusing it reproduces the run.
    pub seed: u64,
    /// Best-ever fitness after each generation, starting with the initial population.
    pub fitness_history: Vec<Fitness>,
    pub warnings: Vec<RunWarning>,
}

impl RunResult {
    pub fn has_warning(&self, warning: RunWarning) -> bool {
        self.warnings.contains(&warning)
    }

    /// Share of clients covered by the best placement, `0.0` without clients.
    pub fn coverage_ratio(&self) -> f64 {
        if self.client_count == 0 {
            return 0.0;
        }
        self.best_fitness as f64 / self.client_count as f64
    }
}
