//! Per-turn snapshot recording.
//!
//! The runner pushes one [`TurnSnapshot`] to the sink after every turn.
//! The in-memory sink keeps the whole history for tests and reports; the
//! no-op sink is for runs that only care about the outcome.

use trails_types::TurnSnapshot;

/// Receives one snapshot per completed turn.
pub trait MetricsSink {
    /// Called after a turn completes successfully.
    fn record_turn(&mut self, snapshot: &TurnSnapshot);
}

/// A sink that keeps every snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryMetrics {
    turns: Vec<TurnSnapshot>,
}

impl MemoryMetrics {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded snapshots, oldest first.
    #[must_use]
    pub fn history(&self) -> &[TurnSnapshot] {
        &self.turns
    }
}

impl MetricsSink for MemoryMetrics {
    fn record_turn(&mut self, snapshot: &TurnSnapshot) {
        self.turns.push(snapshot.clone());
    }
}

/// A sink that discards everything.
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsSink for NoOpMetrics {
    fn record_turn(&mut self, _snapshot: &TurnSnapshot) {}
}
