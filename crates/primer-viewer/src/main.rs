mod app;
mod config;

use std::process::ExitCode;

use clap::Parser;

use primer_engine::device::GpuInit;
use primer_engine::logging::{init_logging, LoggingConfig};
use primer_engine::window::Runtime;

use app::SphereApp;
use config::{Args, SceneConfig};

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..Default::default()
    });

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let gpu_init = GpuInit::default().with_vsync(args.vsync);
    let runtime = args.runtime_config();

    // Geometry and shader text are validated before any window opens.
    let scene = SceneConfig::from_args(&args)?;
    let app = SphereApp::new(scene)?;

    Runtime::run(runtime, gpu_init, app)
}
