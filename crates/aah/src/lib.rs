//! aah: spectra of the two-dimensional Aubry-André-Harper model.
//!
//! Re-exports the Hamiltonian builder, diagonalization and phase sweeps from
//! `aah-core` and the PNG plotter from `aah-plot`.

pub use aah_core::{self, config, diag, hamiltonian, lattice, observables, scan};
pub use aah_core::{
    AahError, AahParams, Axis, Boundary, GOLDEN_RATIO, Lattice, Result, RunConfig, ScanConfig,
    Spectrum, SpectrumSample, SpectrumScan, build_hamiltonian, diagonalize, idx, load_config,
    onsite_potential, phase_grid, save_config, scan_phi_x,
};
#[cfg(feature = "parallel")]
pub use aah_core::par_scan_phi_x;
pub use aah_plot::{self, PlotError, PlotStyle, render, save_spectrum_png, title};
