use crate::models::Fitness;
use serde::{Deserialize, Serialize};

// ============================================================
// GenerationCompleted
// ============================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCompletedEvent {
    /// Zero for the initial population, then one per bred generation.
    pub generation: u32,
    /// Best fitness seen in any generation so far.
    pub best_fitness: Fitness,
    /// Consecutive generations without improvement.
    pub stagnation: u32,
}

impl GenerationCompletedEvent {
    pub fn new(generation: u32, best_fitness: Fitness, stagnation: u32) -> Self {
        Self {
            generation,
            best_fitness,
            stagnation,
        }
    }
}

// ============================================================
// Observer
// ============================================================

/// Receives progress once per generation. Observers only see copies of the run state.
pub trait Observer {
    fn on_generation(&mut self, event: &GenerationCompletedEvent);
}

impl<F> Observer for F
where
    F: FnMut(&GenerationCompletedEvent),
{
    fn on_generation(&mut self, event: &GenerationCompletedEvent) {
        self(event)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_generation(&mut self, _: &GenerationCompletedEvent) {}
}
