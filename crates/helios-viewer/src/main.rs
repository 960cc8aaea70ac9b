use anyhow::Result;
use winit::dpi::LogicalSize;

use helios_engine::device::GpuInit;
use helios_engine::frame::FrameOrchestrator;
use helios_engine::logging::{init_logging, LoggingConfig};
use helios_engine::window::{Runtime, RuntimeConfig};

const INITIAL_EDGE: f64 = 1300.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "helios viewer".to_string(),
        initial_size: LogicalSize::new(INITIAL_EDGE, INITIAL_EDGE),
    };

    log::info!("starting helios viewer at {INITIAL_EDGE}x{INITIAL_EDGE}");

    Runtime::run(config, GpuInit::default(), FrameOrchestrator::new)
}
