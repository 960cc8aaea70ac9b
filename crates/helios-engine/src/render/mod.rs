//! Display subsystem.
//!
//! Presents the off-screen image store to the surface through a textured
//! fullscreen quad. The quad geometry is static and uploaded once; the
//! per-frame cost is a single render pass with one draw call.

mod display;
pub mod uniforms;

pub use display::DisplayStage;
