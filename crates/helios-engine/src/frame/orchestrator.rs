use crate::compute::ComputeStage;
use crate::core::{App, AppControl};
use crate::device::{pipelines, Gpu, GpuFrame, SetupError, SurfaceErrorAction};
use crate::image::{CompletionSignal, ImageStore, SlotSequencer};
use crate::render::uniforms::FrameUniforms;
use crate::render::DisplayStage;

use super::FrameStats;

/// Sequences the two GPU passes for one window.
///
/// Per refresh tick: the display stage samples the current read slot (the
/// last image the compute stage finished) and presents it, then a compute
/// pass is dispatched into the write slot for a later tick to display. Each
/// pass submits its own command buffer to the shared queue; the data hazard
/// between them is closed by the double buffer + completion signal, not by
/// submission order.
pub struct FrameOrchestrator {
    store: ImageStore,
    display: DisplayStage,
    compute: ComputeStage,
    sequencer: SlotSequencer,
    signal: CompletionSignal,
    stats: FrameStats,
}

impl FrameOrchestrator {
    /// Builds the program library, image store, and both stages against an
    /// initialized GPU context.
    ///
    /// The context is injected by reference; the orchestrator never owns
    /// device state. Any error here is a setup failure, fatal by contract.
    pub fn new(gpu: &Gpu<'_>) -> Result<Self, SetupError> {
        let size = gpu.size();
        let uniforms = FrameUniforms::new(size.width, size.height);

        let module = pipelines::create_program_library(gpu.device())?;
        let store = ImageStore::new(gpu.device(), size.width, size.height)?;
        let display = DisplayStage::new(
            gpu.device(),
            &module,
            gpu.surface_format(),
            &store,
            uniforms,
        )?;
        let compute = ComputeStage::new(gpu.device(), &module, &store, uniforms)?;

        log::info!(
            "frame orchestrator ready: {}x{} image store, dispatch grid {:?}",
            store.width(),
            store.height(),
            compute.extent()
        );

        Ok(Self {
            store,
            display,
            compute,
            sequencer: SlotSequencer::new(),
            signal: CompletionSignal::new(),
            stats: FrameStats::default(),
        })
    }

    /// Counters for the run so far.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// The creation-time frame uniforms (never updated on resize).
    pub fn uniforms(&self) -> FrameUniforms {
        self.display.uniforms()
    }

    /// Pixel extent of the image store (fixed).
    pub fn image_extent(&self) -> (u32, u32) {
        (self.store.width(), self.store.height())
    }
}

impl App for FrameOrchestrator {
    fn on_frame(&mut self, gpu: &mut Gpu<'_>) -> AppControl {
        let frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                let action = gpu.handle_surface_error(&err);
                if control_for_surface_error(action) == AppControl::Fatal {
                    log::error!("fatal surface error: {err}");
                    return AppControl::Fatal;
                }
                // No drawable: this tick's work is dropped silently; the next
                // tick is attempted independently.
                self.stats.record_skip();
                log::debug!("no drawable this tick: {err}");
                return AppControl::Continue;
            }
        };

        let plan = self.sequencer.plan(self.signal.finished());
        if plan.swap {
            log::trace!("image slots swapped; read slot {}", self.sequencer.read_slot());
        }

        // Display pass over the read slot, then present. Exactly one present
        // per tick.
        let GpuFrame {
            surface_texture,
            view,
            mut encoder,
        } = frame;
        self.display.draw(&mut encoder, &view, self.sequencer.read_slot());
        gpu.submit(encoder);
        surface_texture.present();
        self.stats.record_presented();

        // Compute pass into the write slot, on its own command buffer, only
        // once the previous submission has drained.
        if plan.dispatch {
            self.compute.dispatch(
                gpu.device(),
                gpu.queue(),
                self.sequencer.write_slot(),
                &self.signal,
            );
            self.stats.record_dispatch();
        }

        AppControl::Continue
    }
}

/// Maps the surface-error tier to loop control: only out-of-memory ends the
/// run; transient errors drop the tick and continue.
fn control_for_surface_error(action: SurfaceErrorAction) -> AppControl {
    match action {
        SurfaceErrorAction::Fatal => AppControl::Fatal,
        SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => AppControl::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::TickPlan;

    // Mirrors the bookkeeping `on_frame` performs around the GPU calls:
    // plan, present, and dispatch-with-arm.
    fn simulate_tick(
        seq: &mut SlotSequencer,
        signal: &CompletionSignal,
        stats: &mut FrameStats,
    ) -> TickPlan {
        let plan = seq.plan(signal.finished());
        stats.record_presented();
        if plan.dispatch {
            signal.arm();
            stats.record_dispatch();
        }
        plan
    }

    #[test]
    fn exactly_one_present_per_tick() {
        let mut seq = SlotSequencer::new();
        let signal = CompletionSignal::new();
        let mut stats = FrameStats::default();

        for tick in 0..5 {
            simulate_tick(&mut seq, &signal, &mut stats);
            // Let every other submission complete.
            if tick % 2 == 0 {
                signal.notifier()();
            }
        }

        assert_eq!(stats.frames, 5);
        assert_eq!(stats.presents, 5);
        assert_eq!(stats.presents, stats.frames);
    }

    #[test]
    fn slow_compute_stalls_dispatch_but_not_presentation() {
        let mut seq = SlotSequencer::new();
        let signal = CompletionSignal::new();
        let mut stats = FrameStats::default();

        // Tick 0 dispatches; the submission never completes, so later ticks
        // keep presenting the old slot without re-dispatching.
        simulate_tick(&mut seq, &signal, &mut stats);
        let read_before = seq.read_slot();

        for _ in 0..3 {
            let plan = simulate_tick(&mut seq, &signal, &mut stats);
            assert!(!plan.dispatch);
            assert!(!plan.swap);
            assert_eq!(seq.read_slot(), read_before);
        }

        assert_eq!(stats.presents, 4);
        assert_eq!(stats.compute_dispatches, 1);
    }

    #[test]
    fn completed_compute_flips_the_displayed_slot() {
        let mut seq = SlotSequencer::new();
        let signal = CompletionSignal::new();
        let mut stats = FrameStats::default();

        simulate_tick(&mut seq, &signal, &mut stats);
        signal.notifier()();

        let plan = simulate_tick(&mut seq, &signal, &mut stats);
        assert!(plan.swap);
        assert!(plan.dispatch);
        assert_eq!(seq.read_slot(), 1);
        assert_eq!(stats.compute_dispatches, 2);
    }

    #[test]
    fn out_of_memory_ends_the_run_as_fatal() {
        use crate::device::surface_error_action;

        let action = surface_error_action(&wgpu::SurfaceError::OutOfMemory);
        assert_eq!(control_for_surface_error(action), AppControl::Fatal);

        // Transient drawable failures drop the tick but keep the loop alive.
        for err in [
            wgpu::SurfaceError::Timeout,
            wgpu::SurfaceError::Outdated,
            wgpu::SurfaceError::Lost,
            wgpu::SurfaceError::Other,
        ] {
            let action = surface_error_action(&err);
            assert_eq!(control_for_surface_error(action), AppControl::Continue);
        }
    }

    #[test]
    fn skipped_ticks_are_counted_separately() {
        let mut stats = FrameStats::default();
        stats.record_skip();
        stats.record_skip();
        assert_eq!(stats.skipped_ticks, 2);
        assert_eq!(stats.frames, 0);
        assert_eq!(stats.presents, 0);
    }
}
