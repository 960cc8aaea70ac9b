//! Compute subsystem.
//!
//! Dispatches the trace kernel that fills one image store slot per tick. The
//! dispatch grid is sized from the creation-time window extent with a fixed
//! 10x10x1 workgroup.

mod grid;
mod stage;

pub use grid::{dispatch_extent, WORKGROUP_SIZE};
pub use stage::ComputeStage;
