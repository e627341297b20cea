//! Ordering pipeline: stage orchestration, outcome and error reporting.
//!
//! ## Submodules
//!
//! - [`runner`]: Stage orchestration
//! - [`observer`]: Timing and cancellation hooks
//! - [`artifacts`]: The [`MixOutcome`] a run produces
//! - [`errors`]: Serialisable error reports for the JSON boundary

pub mod artifacts;
pub mod errors;
pub mod observer;
pub mod runner;

pub use artifacts::MixOutcome;
pub use errors::{PipelineRuntimeError, STAGE_CONFIG, STAGE_DECODE, STAGE_INPUT};
pub use observer::{
    AbortBefore, NoopObserver, PipelineObserver, StageClock, StageReport, StageTimingObserver,
    StageTracker,
};
pub use runner::Pipeline;
