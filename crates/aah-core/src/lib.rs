#![allow(clippy::needless_range_loop)]
//! Two-dimensional Aubry-André-Harper model on finite rectangular lattices.
//!
//! Builds the dense real-symmetric tight-binding Hamiltonian with
//! quasi-periodic on-site modulation, diagonalizes it and sweeps the x phase
//! to trace the spectrum.
//!
//! # Modules
//!
//! - [`lattice`]: Site ↔ basis-index mapping and nearest-neighbour bonds
//! - [`hamiltonian`]: Dense AAH Hamiltonian construction
//! - [`diag`]: Dense eigendecomposition via nalgebra
//! - [`scan`]: φx sweeps, serial or on rayon
//! - [`observables`]: IPR, level-spacing ratio, site densities
//! - [`config`]: JSON run configuration

pub mod config;
pub mod diag;
pub mod error;
pub mod hamiltonian;
pub mod lattice;
pub mod observables;
pub mod scan;

pub use config::{RunConfig, ScanConfig, load_config, save_config};
pub use diag::{Spectrum, diagonalize};
pub use error::{AahError, Result};
pub use hamiltonian::{AahParams, Boundary, build_hamiltonian, onsite_potential};
pub use lattice::{Axis, Lattice, idx};
#[cfg(feature = "parallel")]
pub use scan::par_scan_phi_x;
pub use scan::{SpectrumSample, SpectrumScan, phase_grid, scan_phi_x};

/// The golden mean (√5 − 1)/2, the usual irrational modulation frequency.
pub const GOLDEN_RATIO: f64 = 0.618_033_988_749_894_9;
