//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single presentation window, and wires
//! the redraw callback to the app's per-tick driver.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
