use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl};
use crate::device::{Gpu, GpuInit, SetupError};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "helios".to_string(),
            initial_size: LogicalSize::new(1300.0, 1300.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the window closes or the app exits.
    ///
    /// `make_app` is called once, after the window and GPU context exist, so
    /// the frame driver can build its pipelines against the live device.
    /// Setup failures (window, device, pipelines) and a fatal frame-loop
    /// failure (`AppControl::Fatal`) are carried out of the event loop and
    /// returned to the caller; an orderly close returns `Ok`.
    pub fn run<A, F>(config: RuntimeConfig, gpu_init: GpuInit, make_app: F) -> Result<()>
    where
        A: App + 'static,
        F: FnOnce(&Gpu<'_>) -> Result<A, SetupError> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState {
            config,
            gpu_init,
            make_app: Some(make_app),
            entry: None,
            app: None,
            run_error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(err) = state.run_error {
            return Err(err);
        }
        Ok(())
    }
}

// The wgpu surface borrows the window; ouroboros keeps both in one entry.
#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct HostState<A, F>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    make_app: Option<F>,

    entry: Option<WindowEntry>,
    app: Option<A>,

    // Fatal setup or frame-loop failure, surfaced after the event loop
    // unwinds.
    run_error: Option<anyhow::Error>,
}

impl<A, F> HostState<A, F>
where
    A: App + 'static,
    F: FnOnce(&Gpu<'_>) -> Result<A, SetupError> + 'static,
{
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let make_app = self
            .make_app
            .take()
            .context("application already constructed")?;
        let app = entry
            .with_gpu(|gpu| make_app(gpu))
            .context("application setup failed")?;

        entry.with_window(|w| w.request_redraw());

        self.app = Some(app);
        self.entry = Some(entry);
        Ok(())
    }

    fn window_id(&self) -> Option<WindowId> {
        self.entry.as_ref().map(|e| e.with_window(|w| w.id()))
    }
}

impl<A, F> ApplicationHandler for HostState<A, F>
where
    A: App + 'static,
    F: FnOnce(&Gpu<'_>) -> Result<A, SetupError> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(err) = self.init_window(event_loop) {
            log::error!("setup failed: {err:#}");
            self.run_error = Some(err);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the compute stage re-traces every tick.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window_id() != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    // The swapchain follows the window; the image store and
                    // frame uniforms keep their creation-time extent.
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                // Split borrows to avoid `self` capture inside the closure.
                let (app, entry) = (&mut self.app, &mut self.entry);
                if let (Some(app), Some(entry)) = (app.as_mut(), entry.as_mut()) {
                    match entry.with_gpu_mut(|gpu| app.on_frame(gpu)) {
                        AppControl::Continue => {}
                        AppControl::Exit => event_loop.exit(),
                        AppControl::Fatal => {
                            self.run_error =
                                Some(anyhow::anyhow!("frame loop aborted: device out of memory"));
                            event_loop.exit();
                        }
                    }
                }
            }

            _ => {}
        }
    }
}
