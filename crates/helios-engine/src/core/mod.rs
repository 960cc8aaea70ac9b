//! Engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and the
//! frame driver, keeping winit internals out of the frame path.

mod app;

pub use app::{App, AppControl};
