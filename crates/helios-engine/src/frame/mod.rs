//! Per-tick orchestration of the display and compute passes.

mod orchestrator;
mod stats;

pub use orchestrator::FrameOrchestrator;
pub use stats::FrameStats;
