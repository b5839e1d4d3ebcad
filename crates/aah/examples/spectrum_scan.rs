//! φx sweep of the 2D AAH model: tabulates the spectrum and writes a PNG.
//!
//! Prints every 25th sample: φx/2π, E_min, E_max, ⟨r⟩ and the mean IPR at
//! that phase. The figure goes to figures/spectrum.png.
//!
//! Run:
//!   cargo run --example spectrum_scan -p aah --release

use aah::config::RunConfig;
use aah::{
    PlotStyle, build_hamiltonian, diagonalize, observables, save_spectrum_png, scan_phi_x, title,
};
use std::f64::consts::TAU;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig::default();
    let model = &config.model;
    eprintln!("=== {} ===\n", title(model));

    let phases = config.scan.phases();
    let scan = scan_phi_x(model, &phases)?;

    println!("phi_over_2pi\te_min\te_max\tr_mean\tmean_ipr");
    for sample in scan.samples.iter().step_by(25) {
        let spec = diagonalize(&build_hamiltonian(&model.with_phi_x(sample.phi_x))?, None)?;
        println!(
            "{:.4}\t{:.6}\t{:.6}\t{:.4}\t{:.4}",
            sample.phi_x / TAU,
            sample.energies[0],
            sample.energies[sample.energies.len() - 1],
            observables::level_spacing_ratio(&sample.energies),
            observables::mean_ipr(&spec),
        );
    }

    save_spectrum_png(&scan, &PlotStyle::default(), &config.output)?;
    println!("Saved {}", config.output.display());
    Ok(())
}
