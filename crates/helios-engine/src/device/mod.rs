//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - compiling the program library and building both pipelines
//! - acquiring frames and providing encoders/views for rendering

mod error;
mod gpu;
pub mod pipelines;

pub use error::{surface_error_action, SetupError, SurfaceErrorAction};
pub use gpu::{Gpu, GpuFrame, GpuInit};
