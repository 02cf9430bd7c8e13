use anyhow::Result;
use clap::Parser;
use hpa4n_config::Config;
use tokio::runtime::Builder;
use tracing::{error, info};

pub mod cli;
pub mod commands;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let _logging_guard = hpa4n_common::logging::initialize(hpa4n_config::APP_NAME)?;
    info!("{} v{} started", hpa4n_config::APP_NAME, hpa4n_config::APP_VERSION);

    if let Err(error) = run_application(&args) {
        error!(
            "{} v{} terminated with an error: {}",
            hpa4n_config::APP_NAME,
            hpa4n_config::APP_VERSION,
            error
        );
        Err(error)
    } else {
        info!("{} v{} stopped", hpa4n_config::APP_NAME, hpa4n_config::APP_VERSION);
        Ok(())
    }
}

fn run_application(args: &cli::Args) -> Result<()> {
    let rt = Builder::new_multi_thread().enable_all().build()?;

    let config = match args.config.as_deref() {
        Some(path) => rt.block_on(Config::load_or_create_at(path))?,
        None => rt.block_on(Config::load_or_create())?,
    };

    rt.block_on(commands::execute(args, &config))
}
