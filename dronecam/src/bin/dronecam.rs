/// Drone camera ROI tracker
///
/// Usage:
///   dronecam [IMAGE]                       # select the target on screen, quit with q
///   dronecam --headless --roi 120,80,60,40 droneCam.ppm
///
/// Box lines go to stdout, logs to stderr (RUST_LOG controls verbosity).
use anyhow::Context;
use clap::Parser;
use dronecam::cli::Args;
use std::process::ExitCode;

fn run(args: Args) -> anyhow::Result<()> {
    let config = args.into_config().context("invalid configuration")?;
    log::debug!("Configuration: {:?}", config);

    dronecam::app::run(&config).context("tracking stopped")?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("dronecam {}", dronecam::version());

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
