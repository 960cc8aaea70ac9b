/// Plain per-run counters for the frame loop.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct FrameStats {
    /// Ticks that reached the display pass.
    pub frames: u64,
    /// Surface presents issued. One per completed tick.
    pub presents: u64,
    /// Compute passes submitted.
    pub compute_dispatches: u64,
    /// Ticks skipped because no drawable was available.
    pub skipped_ticks: u64,
}

impl FrameStats {
    /// Records a tick that rendered and presented.
    pub(crate) fn record_presented(&mut self) {
        self.frames += 1;
        self.presents += 1;
    }

    /// Records a compute submission.
    pub(crate) fn record_dispatch(&mut self) {
        self.compute_dispatches += 1;
    }

    /// Records a tick dropped for lack of a drawable.
    pub(crate) fn record_skip(&mut self) {
        self.skipped_ticks += 1;
    }
}
