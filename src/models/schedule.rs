use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Controls when the evolutionary loop stops.
///
/// A run stops after `max_generations` bred generations, or earlier once the best-ever fitness
/// has failed to improve for `max_stagnant_generations` consecutive generations.
///
/// # Examples
///
/// ```rust
/// use antenna_ga::models::{Schedule, ScheduleDecision, StopReason};
///
/// let schedule = Schedule::new(100, 10);
///
/// assert_eq!(schedule.decide(5, 3), ScheduleDecision::Continue);
/// assert_eq!(schedule.decide(5, 10), ScheduleDecision::Terminate(StopReason::Stagnation));
/// assert_eq!(schedule.decide(100, 0), ScheduleDecision::Terminate(StopReason::MaxGenerations));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Schedule {
    /// Number of generations bred after the initial population.
    pub max_generations: u32,
    /// Consecutive generations without a strict improvement that end the run.
    pub max_stagnant_generations: u32,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The generation budget was used up.
    MaxGenerations,
    /// The best-ever fitness stopped improving.
    Stagnation,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::MaxGenerations => f.write_str("max generations reached"),
            StopReason::Stagnation => f.write_str("stagnation"),
        }
    }
}

/// Decision returned by [`Schedule::decide`] after each generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleDecision {
    /// Breed another generation.
    Continue,
    /// Stop and report the best-ever individual.
    Terminate(StopReason),
}

impl Schedule {
    pub fn new(max_generations: u32, max_stagnant_generations: u32) -> Self {
        Self {
            max_generations,
            max_stagnant_generations,
        }
    }

    /// Decides whether to continue after `generation` bred generations with `stagnation`
    /// consecutive generations without improvement.
    ///
    /// Stagnation is checked first, so a run hitting both limits at once reports stagnation.
    #[instrument(level = "debug", skip(self), fields(max_generations = self.max_generations, max_stagnant_generations = self.max_stagnant_generations))]
    pub fn decide(&self, generation: u32, stagnation: u32) -> ScheduleDecision {
        if stagnation >= self.max_stagnant_generations {
            return ScheduleDecision::Terminate(StopReason::Stagnation);
        }

        if generation >= self.max_generations {
            return ScheduleDecision::Terminate(StopReason::MaxGenerations);
        }

        ScheduleDecision::Continue
    }

    /// Share of the generation budget used so far, clamped to `[0.0, 1.0]`.
    pub fn progress(&self, generation: u32) -> f64 {
        if self.max_generations == 0 {
            return 1.0;
        }
        (generation as f64 / self.max_generations as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_continues_within_budget() {
        let schedule = Schedule::new(10, 3);

        assert_eq!(schedule.decide(0, 0), ScheduleDecision::Continue);
        assert_eq!(schedule.decide(9, 2), ScheduleDecision::Continue);
    }

    #[test]
    fn it_terminates_on_max_generations() {
        let schedule = Schedule::new(10, 3);

        assert_eq!(
            schedule.decide(10, 0),
            ScheduleDecision::Terminate(StopReason::MaxGenerations)
        );
    }

    #[test]
    fn it_terminates_on_stagnation() {
        let schedule = Schedule::new(10, 3);

        assert_eq!(
            schedule.decide(4, 3),
            ScheduleDecision::Terminate(StopReason::Stagnation)
        );
    }

    #[test]
    fn it_prefers_stagnation_when_both_limits_hit() {
        let schedule = Schedule::new(5, 5);

        assert_eq!(
            schedule.decide(5, 5),
            ScheduleDecision::Terminate(StopReason::Stagnation)
        );
    }

    #[test]
    fn it_reports_progress() {
        let schedule = Schedule::new(4, 2);

        assert_eq!(schedule.progress(0), 0.0);
        assert_eq!(schedule.progress(1), 0.25);
        assert_eq!(schedule.progress(8), 1.0);
    }

    #[test]
    fn it_displays_stop_reasons() {
        assert_eq!(
            StopReason::MaxGenerations.to_string(),
            "max generations reached"
        );
        assert_eq!(StopReason::Stagnation.to_string(), "stagnation");
    }
}
