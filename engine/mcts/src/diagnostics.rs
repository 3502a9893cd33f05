//! Search diagnostics.
//!
//! Read-only counters and timing collected while a search runs. Nothing in
//! the search reads them back; they exist for logging and inspection.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

/// Counters and timing for one search.
#[derive(Debug, Clone, Default)]
pub struct SearchDiagnostics {
    /// Completed select → expand → simulate → backpropagate cycles
    pub playouts: u32,
    /// Nodes expanded (including the root)
    pub expansions: u32,
    /// Child nodes created by expansion
    pub nodes_created: u32,
    /// Playouts that ended on a terminal node
    pub terminal_playouts: u32,
    /// Plies played across all rollouts
    pub rollout_plies: u64,
    /// Deepest node reached by selection
    pub max_selection_depth: u32,
    /// Search stopped on an abort request or the time limit
    pub aborted: bool,
    /// Wall-clock duration, set when the search finishes
    pub elapsed: Duration,
    started: Option<Instant>,
    finished: bool,
}

/// Serializable view of `SearchDiagnostics`.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsSnapshot {
    pub playouts: u32,
    pub expansions: u32,
    pub nodes_created: u32,
    pub terminal_playouts: u32,
    pub rollout_plies: u64,
    pub avg_rollout_plies: f64,
    pub max_selection_depth: u32,
    pub aborted: bool,
    pub elapsed_ms: f64,
    pub playouts_per_second: f64,
}

impl SearchDiagnostics {
    /// Fresh counters with the stopwatch running.
    pub fn start() -> Self {
        Self {
            started: Some(Instant::now()),
            ..Self::default()
        }
    }

    pub fn record_expansion(&mut self, children: usize) {
        self.expansions += 1;
        self.nodes_created += children as u32;
    }

    pub fn record_playout(&mut self, depth: u32, rollout_plies: u32, terminal: bool) {
        self.playouts += 1;
        self.rollout_plies += rollout_plies as u64;
        self.max_selection_depth = self.max_selection_depth.max(depth);
        if terminal {
            self.terminal_playouts += 1;
        }
    }

    /// Time since `start`, or the final duration once finished.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) if !self.finished => started.elapsed(),
            _ => self.elapsed,
        }
    }

    /// Stop the stopwatch.
    pub fn finish(&mut self, aborted: bool) {
        self.aborted = aborted;
        if let Some(started) = self.started {
            self.elapsed = started.elapsed();
        }
        self.finished = true;
    }

    pub fn playouts_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.playouts as f64 / secs
        } else {
            0.0
        }
    }

    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        let avg_rollout_plies = if self.playouts > 0 {
            self.rollout_plies as f64 / self.playouts as f64
        } else {
            0.0
        };

        DiagnosticsSnapshot {
            playouts: self.playouts,
            expansions: self.expansions,
            nodes_created: self.nodes_created,
            terminal_playouts: self.terminal_playouts,
            rollout_plies: self.rollout_plies,
            avg_rollout_plies,
            max_selection_depth: self.max_selection_depth,
            aborted: self.aborted,
            elapsed_ms: self.elapsed().as_secs_f64() * 1000.0,
            playouts_per_second: self.playouts_per_second(),
        }
    }

    /// Emit the end-of-search summary.
    pub fn log(&self) {
        let snapshot = self.snapshot();
        info!(
            playouts = snapshot.playouts,
            expansions = snapshot.expansions,
            nodes = snapshot.nodes_created,
            terminal_playouts = snapshot.terminal_playouts,
            avg_rollout_plies = snapshot.avg_rollout_plies,
            max_depth = snapshot.max_selection_depth,
            aborted = snapshot.aborted,
            elapsed_ms = snapshot.elapsed_ms,
            playouts_per_sec = snapshot.playouts_per_second,
            "MCTS search finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut diag = SearchDiagnostics::start();
        diag.record_expansion(20);
        diag.record_expansion(3);
        diag.record_playout(1, 6, false);
        diag.record_playout(4, 2, true);
        diag.finish(false);

        assert_eq!(diag.expansions, 2);
        assert_eq!(diag.nodes_created, 23);
        assert_eq!(diag.playouts, 2);
        assert_eq!(diag.rollout_plies, 8);
        assert_eq!(diag.terminal_playouts, 1);
        assert_eq!(diag.max_selection_depth, 4);
        assert!(!diag.aborted);

        let snapshot = diag.snapshot();
        assert!((snapshot.avg_rollout_plies - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_finish_freezes_elapsed() {
        let mut diag = SearchDiagnostics::start();
        diag.finish(true);
        let frozen = diag.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(diag.elapsed(), frozen);
        assert!(diag.aborted);
    }

    #[test]
    fn test_empty_snapshot() {
        let diag = SearchDiagnostics::default();
        let snapshot = diag.snapshot();
        assert_eq!(snapshot.playouts, 0);
        assert!(snapshot.avg_rollout_plies.abs() < 1e-12);
        assert!(snapshot.playouts_per_second.abs() < 1e-12);
    }
}
