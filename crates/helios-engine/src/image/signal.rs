use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Completion flag for an in-flight compute submission.
///
/// Armed before submit; wgpu's submitted-work-done callback marks it finished
/// from the queue's callback thread. This is the explicit signal between a
/// compute submission and the render pass that consumes its output — the
/// handoff does not rely on cross-buffer queue ordering.
#[derive(Debug, Clone, Default)]
pub struct CompletionSignal {
    flag: Arc<AtomicBool>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-arms the signal ahead of a new submission.
    pub fn arm(&self) {
        self.flag.store(false, Ordering::Release);
    }

    /// True once the armed submission has completed on the GPU.
    pub fn finished(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Returns the callback to hand to `wgpu::Queue::on_submitted_work_done`.
    pub fn notifier(&self) -> impl FnOnce() + Send + 'static {
        let flag = Arc::clone(&self.flag);
        move || flag.store(true, Ordering::Release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_signal_is_not_finished() {
        let signal = CompletionSignal::new();
        signal.arm();
        assert!(!signal.finished());
    }

    #[test]
    fn notifier_marks_finished() {
        let signal = CompletionSignal::new();
        signal.arm();
        let notify = signal.notifier();
        notify();
        assert!(signal.finished());
    }

    #[test]
    fn rearming_clears_completion() {
        let signal = CompletionSignal::new();
        signal.arm();
        signal.notifier()();
        assert!(signal.finished());

        signal.arm();
        assert!(!signal.finished());
    }
}
