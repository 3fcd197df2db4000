//! Human readable summary of a finished run.

use crate::models::Configuration;
use crate::services::optimization::RunResult;
use std::fmt;

/// Renders a [`RunResult`] together with the parameters that produced it.
///
/// # Examples
///
/// ```rust,no_run
/// use antenna_ga::{models::Configuration, report::Report};
///
/// # fn show(result: &antenna_ga::RunResult) {
/// let configuration = Configuration::default();
/// println!("{}", Report::new(result, &configuration));
/// # }
/// ```
pub struct Report<'a> {
    result: &'a RunResult,
    configuration: &'a Configuration,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a RunResult, configuration: &'a Configuration) -> Self {
        Self {
            result,
            configuration,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        let configuration = self.configuration;

        writeln!(f, "=== Optimization Result ===")?;
        writeln!(f, "Total clients: {}", result.client_count)?;
        writeln!(f, "Antennas placed: {}", result.antenna_positions.len())?;
        writeln!(
            f,
            "Best coverage found: {} clients ({:.1}%)",
            result.best_fitness,
            result.coverage_ratio() * 100.0
        )?;
        writeln!(f, "Generations run: {}", result.generations_run)?;
        writeln!(f, "Stopped by: {}", result.stopped_reason)?;
        for warning in &result.warnings {
            writeln!(f, "Warning: {warning}")?;
        }
        writeln!(f)?;

        writeln!(f, "Antenna positions (x, y):")?;
        for (index, position) in result.antenna_positions.iter().enumerate() {
            writeln!(
                f,
                "  Antenna {:02}: ({:.2}, {:.2})",
                index + 1,
                position.x,
                position.y
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Binary chromosome:")?;
        writeln!(f, "{}", result.best_chromosome)?;
        writeln!(f)?;

        writeln!(f, "=== Genetic Algorithm Parameters ===")?;
        writeln!(f, "POPULATION_SIZE: {}", configuration.population_size)?;
        writeln!(f, "MAX_GENERATIONS: {}", configuration.max_generations)?;
        writeln!(f, "ELITISM_COUNT: {}", configuration.elitism_count)?;
        writeln!(f, "CROSSOVER_RATE: {}", configuration.crossover_rate)?;
        writeln!(f, "MUTATION_RATE: {}", configuration.mutation_rate)?;
        writeln!(
            f,
            "MAX_STAGNANT_GENERATIONS: {}",
            configuration.max_stagnant_generations
        )?;
        writeln!(f, "RANDOM_SEED: {}", result.seed)?;
        writeln!(f)?;

        writeln!(f, "=== Problem Parameters ===")?;
        writeln!(f, "NUM_ANTENNAS: {}", configuration.antenna_count)?;
        writeln!(f, "BITS_PER_COORD: {}", configuration.bits_per_coordinate)?;
        writeln!(
            f,
            "MAP_X: [{}, {}]",
            configuration.bounds.min_x, configuration.bounds.max_x
        )?;
        writeln!(
            f,
            "MAP_Y: [{}, {}]",
            configuration.bounds.min_y, configuration.bounds.max_y
        )?;
        write!(f, "ANTENNA_RADIUS: {}", configuration.antenna_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, StopReason};
    use crate::services::optimization::RunWarning;

    fn create_test_result() -> RunResult {
        RunResult {
            best_chromosome: "10110".parse().unwrap(),
            best_fitness: 3,
            antenna_positions: vec![Position::new(12.5, 40.0), Position::new(0.0, 1000.0)],
            generations_run: 17,
            stopped_reason: StopReason::Stagnation,
            client_count: 4,
            seed: 99,
            fitness_history: vec![1, 2, 3],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn it_renders_the_summary() {
        let result = create_test_result();
        let configuration = Configuration::default();

        let rendered = Report::new(&result, &configuration).to_string();

        assert!(rendered.contains("Total clients: 4"));
        assert!(rendered.contains("Best coverage found: 3 clients (75.0%)"));
        assert!(rendered.contains("Generations run: 17"));
        assert!(rendered.contains("Stopped by: stagnation"));
        assert!(rendered.contains("  Antenna 01: (12.50, 40.00)"));
        assert!(rendered.contains("  Antenna 02: (0.00, 1000.00)"));
        assert!(rendered.contains("\n10110\n"));
        assert!(rendered.contains("RANDOM_SEED: 99"));
        assert!(rendered.ends_with("ANTENNA_RADIUS: 100"));
    }

    #[test]
    fn it_lists_warnings() {
        let result = RunResult {
            client_count: 0,
            best_fitness: 0,
            warnings: vec![RunWarning::EmptyInput],
            ..create_test_result()
        };
        let configuration = Configuration::default();

        let rendered = Report::new(&result, &configuration).to_string();

        assert!(rendered.contains("(0.0%)"));
        assert!(rendered.contains("Warning: no clients supplied"));
    }
}
