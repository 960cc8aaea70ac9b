use crate::device::Gpu;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Orderly shutdown; the runtime exits the loop and returns `Ok`.
    Exit,
    /// Unrecoverable device failure; the runtime exits the loop and returns
    /// an error so the process terminates nonzero.
    Fatal,
}

/// Per-tick contract implemented by the frame driver.
///
/// The runtime invokes `on_frame` once per refresh tick with the GPU context
/// of the window being redrawn. The driver acquires the drawable itself so it
/// can apply the per-frame skip policy.
pub trait App {
    fn on_frame(&mut self, gpu: &mut Gpu<'_>) -> AppControl;
}
