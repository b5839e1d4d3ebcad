//! Phase sweeps: the spectrum as a function of φx.
//!
//! Every sample rebuilds the Hamiltonian with only `phi_x` changed and
//! keeps its ascending eigenvalues. Samples are independent, so the
//! `parallel` feature can spread them over a rayon pool without changing
//! the result or its order.

use crate::diag;
use crate::error::{AahError, Result};
use crate::hamiltonian::{AahParams, build_hamiltonian};
use nalgebra::DMatrix;
use std::f64::consts::TAU;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// `n` evenly spaced phases starting at 0.
///
/// With `endpoint = false` the grid covers `[0, 2π)` with step `2π/n`;
/// with `endpoint = true` it covers `[0, 2π]` and the last value is
/// exactly 2π.
pub fn phase_grid(n: usize, endpoint: bool) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = if endpoint { TAU / (n - 1) as f64 } else { TAU / n as f64 };
            let mut grid: Vec<f64> = (0..n).map(|k| k as f64 * step).collect();
            if endpoint {
                grid[n - 1] = TAU;
            }
            grid
        }
    }
}

/// One point of a sweep: the phase and all N eigenvalues, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSample {
    pub phi_x: f64,
    pub energies: Vec<f64>,
}

/// Ordered result of a φx sweep.
#[derive(Debug, Clone)]
pub struct SpectrumScan {
    /// Parameters held fixed during the sweep (`phi_x` is ignored).
    pub params: AahParams,
    pub samples: Vec<SpectrumSample>,
}

impl SpectrumScan {
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// Number of eigenvalues per sample (N = lx·ly).
    pub fn n_levels(&self) -> usize {
        self.params.lx * self.params.ly
    }

    pub fn phases(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.phi_x).collect()
    }

    /// φx / 2π for every sample.
    pub fn normalized_phases(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.phi_x / TAU).collect()
    }

    /// Energies as an `(n_samples, N)` matrix; row k is sample k.
    pub fn energy_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.n_samples(), self.n_levels(), |r, c| {
            self.samples[r].energies[c]
        })
    }

    /// Smallest and largest finite energy over all samples.
    pub fn energy_range(&self) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .flat_map(|s| s.energies.iter().copied())
            .filter(|e| e.is_finite())
            .fold(None, |acc, e| match acc {
                None => Some((e, e)),
                Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
            })
    }
}

/// Build and diagonalize at a single phase.
fn sample_at(base: &AahParams, phi_x: f64) -> Result<SpectrumSample> {
    let h = build_hamiltonian(&base.with_phi_x(phi_x))?;
    let energies = diag::eigenvalues(&h)?;
    debug!(
        phi_x,
        e_min = energies.first().copied(),
        e_max = energies.last().copied(),
        "spectrum sample"
    );
    Ok(SpectrumSample { phi_x, energies })
}

fn check_sweep(base: &AahParams, phases: &[f64]) -> Result<()> {
    base.lattice()?;
    if phases.is_empty() {
        return Err(AahError::InvalidParameter("phase sweep is empty".to_string()));
    }
    Ok(())
}

/// Sweep φx over `phases`, holding every other parameter of `base` fixed.
pub fn scan_phi_x(base: &AahParams, phases: &[f64]) -> Result<SpectrumScan> {
    check_sweep(base, phases)?;

    let samples = phases
        .iter()
        .map(|&phi| sample_at(base, phi))
        .collect::<Result<Vec<_>>>()?;

    info!(
        lx = base.lx,
        ly = base.ly,
        samples = samples.len(),
        "phase sweep complete"
    );
    Ok(SpectrumScan {
        params: base.clone(),
        samples,
    })
}

/// Parallel [`scan_phi_x`]; identical output, samples evaluated on rayon.
#[cfg(feature = "parallel")]
pub fn par_scan_phi_x(base: &AahParams, phases: &[f64]) -> Result<SpectrumScan> {
    check_sweep(base, phases)?;

    let samples = phases
        .par_iter()
        .map(|&phi| sample_at(base, phi))
        .collect::<Result<Vec<_>>>()?;

    info!(
        lx = base.lx,
        ly = base.ly,
        samples = samples.len(),
        "parallel phase sweep complete"
    );
    Ok(SpectrumScan {
        params: base.clone(),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_phase_grid_half_open() {
        let g = phase_grid(3, false);
        assert_eq!(g.len(), 3);
        assert_relative_eq!(g[0], 0.0);
        assert_relative_eq!(g[1], TAU / 3.0, epsilon = 1e-15);
        assert_relative_eq!(g[2], 2.0 * TAU / 3.0, epsilon = 1e-15);
        assert!(g.iter().all(|&p| p < TAU));
    }

    #[test]
    fn test_phase_grid_with_endpoint() {
        let g = phase_grid(301, true);
        assert_eq!(g.len(), 301);
        assert_eq!(g[0], 0.0);
        assert_eq!(g[300], TAU);
        assert_relative_eq!(g[150], std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_phase_grid_degenerate_sizes() {
        assert!(phase_grid(0, true).is_empty());
        assert_eq!(phase_grid(1, true), vec![0.0]);
        assert_eq!(phase_grid(1, false), vec![0.0]);
    }

    #[test]
    fn test_phi_x_sweep_shapes() {
        let base = AahParams {
            lx: 3,
            ly: 2,
            t: 1.0,
            lam_x: 0.5,
            alpha_x: 0.377,
            lam_y: 0.0,
            alpha_y: 0.0,
            phi_y: 0.0,
            ..AahParams::default()
        };
        let phases = phase_grid(3, false);
        let scan = scan_phi_x(&base, &phases).unwrap();

        let e = scan.energy_matrix();
        assert_eq!(e.shape(), (3, 6));
        assert!(e.iter().all(|v| v.is_finite()));
        assert_eq!(scan.phases(), phases);
        for s in &scan.samples {
            assert!(s.energies.windows(2).all(|p| p[0] <= p[1]));
        }
    }

    #[test]
    fn test_sample_matches_direct_diagonalization() {
        let base = AahParams::new(3, 3);
        let phi = 0.7;
        let scan = scan_phi_x(&base, &[phi]).unwrap();

        let h = build_hamiltonian(&base.with_phi_x(phi)).unwrap();
        let direct = diag::eigenvalues(&h).unwrap();
        for (a, b) in scan.samples[0].energies.iter().zip(&direct) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalized_phases_and_range() {
        let base = AahParams::new(2, 2);
        let scan = scan_phi_x(&base, &phase_grid(5, true)).unwrap();
        let u = scan.normalized_phases();
        assert_relative_eq!(u[0], 0.0);
        assert_relative_eq!(u[4], 1.0, epsilon = 1e-15);

        let (lo, hi) = scan.energy_range().unwrap();
        assert!(lo <= hi);
        for s in &scan.samples {
            assert!(s.energies.iter().all(|&e| e >= lo && e <= hi));
        }
    }

    #[test]
    fn test_empty_sweep_is_error() {
        let err = scan_phi_x(&AahParams::new(2, 2), &[]).unwrap_err();
        assert!(matches!(err, AahError::InvalidParameter(_)));
    }

    #[test]
    fn test_invalid_lattice_is_error() {
        let err = scan_phi_x(&AahParams::new(0, 2), &[0.0]).unwrap_err();
        assert!(matches!(err, AahError::InvalidDimension { .. }));
    }

    #[test]
    fn test_nan_phase_surfaces_numerical_error() {
        let err = scan_phi_x(&AahParams::new(2, 2), &[0.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, AahError::NonFiniteMatrix { .. }));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_scan_matches_serial() {
        let base = AahParams::new(3, 4);
        let phases = phase_grid(17, false);
        let serial = scan_phi_x(&base, &phases).unwrap();
        let parallel = par_scan_phi_x(&base, &phases).unwrap();
        assert_eq!(serial.samples, parallel.samples);
    }
}
