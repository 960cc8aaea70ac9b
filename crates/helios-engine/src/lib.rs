//! Helios engine crate.
//!
//! Hosts a two-pass GPU image-synthesis loop: a compute stage traces a
//! full-frame image into an off-screen store, and a display stage draws that
//! store to the window surface through a fullscreen quad. The crate owns the
//! device/surface plumbing, the pipeline setup contract, and the per-tick
//! orchestration of the two passes.

pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod image;
pub mod render;
pub mod compute;
pub mod frame;
