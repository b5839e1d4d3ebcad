//! aah-spectrum: φx sweep of the 2D AAH model rendered to PNG.

mod cli;

use aah_core::{AahError, par_scan_phi_x, scan_phi_x};
use aah_plot::{PlotError, PlotStyle, save_spectrum_png, title};
use clap::Parser;
use cli::Cli;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Model(#[from] AahError),

    #[error(transparent)]
    Plot(#[from] PlotError),
}

fn run(cli: &Cli) -> Result<PathBuf, CliError> {
    let config = cli.resolve()?;
    let phases = config.scan.phases();
    info!(
        lx = config.model.lx,
        ly = config.model.ly,
        samples = phases.len(),
        boundary = %config.model.boundary(),
        "starting phase sweep"
    );

    let start = Instant::now();
    let scan = if cli.serial {
        scan_phi_x(&config.model, &phases)?
    } else {
        par_scan_phi_x(&config.model, &phases)?
    };
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "sweep finished");

    save_spectrum_png(&scan, &PlotStyle::default(), &config.output)?;
    info!(title = %title(&config.model), "figure caption");
    Ok(config.output)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_logging();

    match run(&cli) {
        Ok(path) => {
            println!("Saved {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
