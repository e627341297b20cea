//! Stage observers and timing hooks.
//!
//! The runner calls a [`PipelineObserver`] at every stage boundary. All
//! callbacks have empty default bodies, so an observer only implements what
//! it needs. Stage boundaries double as cancellation points: returning `true`
//! from [`PipelineObserver::should_abort`] stops the run before the named
//! stage starts.

use crate::graph::DistanceMatrix;
use crate::tour::{Matching, SpanningTree};
use serde::Serialize;
use std::time::{Duration, Instant};

pub const STAGE_DISTANCES: &str = "distances";
pub const STAGE_SPANNING_TREE: &str = "spanning_tree";
pub const STAGE_MATCHING: &str = "matching";
pub const STAGE_CIRCUIT: &str = "circuit";
pub const STAGE_SHORTCUT: &str = "shortcut";

/// All stages in execution order.
pub const STAGES: [&str; 5] = [
    STAGE_DISTANCES,
    STAGE_SPANNING_TREE,
    STAGE_MATCHING,
    STAGE_CIRCUIT,
    STAGE_SHORTCUT,
];

// ============================================================================
// StageReport
// ============================================================================

/// What one stage did and how long it took.
///
/// `count` is stage specific: matrix rows, tree edges, matched pairs, walk
/// length, ordering length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: &'static str,
    #[serde(with = "duration_micros")]
    pub duration: Duration,
    pub count: usize,
}

mod duration_micros {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_micros() as u64)
    }
}

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    stage: &'static str,
    started: Instant,
}

impl StageClock {
    /// Start timing `stage`
    pub fn start(stage: &'static str) -> Self {
        Self {
            stage,
            started: Instant::now(),
        }
    }

    /// Stop the clock and produce the report
    pub fn finish(self, count: usize) -> StageReport {
        StageReport {
            stage: self.stage,
            duration: self.started.elapsed(),
            count,
        }
    }
}

// ============================================================================
// Observer trait
// ============================================================================

/// Callbacks fired by the pipeline runner.
pub trait PipelineObserver {
    /// Polled before each stage. Return `true` to stop the run.
    fn should_abort(&mut self, _stage: &'static str) -> bool {
        false
    }

    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_distances(&mut self, _distances: &DistanceMatrix) {}

    fn on_tree(&mut self, _tree: &SpanningTree) {}

    fn on_matching(&mut self, _matching: &Matching) {}

    fn on_walk(&mut self, _walk: &[usize]) {}

    fn on_ordering(&mut self, _ordering: &[usize]) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records a [`StageReport`] per completed stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<StageReport>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports in completion order
    pub fn reports(&self) -> &[StageReport] {
        &self.reports
    }

    /// Report for one stage, if it completed
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports.iter().find(|r| r.stage == stage)
    }

    /// Sum of all stage durations
    pub fn total_duration(&self) -> Duration {
        self.reports.iter().map(|r| r.duration).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, _stage: &'static str, report: &StageReport) {
        self.reports.push(report.clone());
    }
}

/// Observer that stops the run before a given stage.
#[derive(Debug, Clone, Copy)]
pub struct AbortBefore {
    stage: &'static str,
}

impl AbortBefore {
    pub fn new(stage: &'static str) -> Self {
        Self { stage }
    }
}

impl PipelineObserver for AbortBefore {
    fn should_abort(&mut self, stage: &'static str) -> bool {
        stage == self.stage
    }
}

/// Observer that remembers the stage currently running, so a failure can be
/// attributed to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTracker {
    current: Option<&'static str>,
}

impl StageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last stage that started, `None` before the first one
    pub fn current(&self) -> Option<&'static str> {
        self.current
    }
}

impl PipelineObserver for StageTracker {
    fn on_stage_start(&mut self, stage: &'static str) {
        self.current = Some(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_clock_report() {
        let clock = StageClock::start(STAGE_MATCHING);
        let report = clock.finish(3);
        assert_eq!(report.stage, STAGE_MATCHING);
        assert_eq!(report.count, 3);
    }

    #[test]
    fn test_timing_observer_collects() {
        let mut obs = StageTimingObserver::new();
        for stage in STAGES {
            let report = StageClock::start(stage).finish(1);
            obs.on_stage_end(stage, &report);
        }
        assert_eq!(obs.reports().len(), 5);
        assert!(obs.report(STAGE_CIRCUIT).is_some());
        assert!(obs.report("unknown").is_none());
        assert!(obs.total_duration() >= obs.reports()[0].duration);
    }

    #[test]
    fn test_abort_before() {
        let mut obs = AbortBefore::new(STAGE_CIRCUIT);
        assert!(!obs.should_abort(STAGE_MATCHING));
        assert!(obs.should_abort(STAGE_CIRCUIT));
        assert!(!NoopObserver.should_abort(STAGE_CIRCUIT));
    }

    #[test]
    fn test_stage_tracker() {
        let mut obs = StageTracker::new();
        assert_eq!(obs.current(), None);
        obs.on_stage_start(STAGE_DISTANCES);
        obs.on_stage_start(STAGE_MATCHING);
        assert_eq!(obs.current(), Some(STAGE_MATCHING));
    }

    #[test]
    fn test_report_serializes_micros() {
        let report = StageReport {
            stage: STAGE_SHORTCUT,
            duration: Duration::from_millis(2),
            count: 4,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["stage"], "shortcut");
        assert_eq!(value["duration"], 2000);
        assert_eq!(value["count"], 4);
    }
}
