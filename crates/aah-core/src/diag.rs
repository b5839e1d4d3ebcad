//! Dense eigendecomposition for small Hamiltonians.
//!
//! Uses nalgebra's `SymmetricEigen` for real symmetric matrices.
//! Intended for lattices up to a few thousand sites.

use crate::error::{AahError, Result};
use nalgebra::{DMatrix, DVector, SymmetricEigen};

/// Eigenvalues and eigenstates from diagonalization.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Eigenvalues in ascending order.
    pub energies: Vec<f64>,
    /// Corresponding eigenstates (columns of the orthogonal matrix).
    pub states: Vec<DVector<f64>>,
}

impl Spectrum {
    /// Ground state energy.
    pub fn ground_energy(&self) -> f64 {
        self.energies[0]
    }

    /// Ground state vector.
    pub fn ground_state(&self) -> &DVector<f64> {
        &self.states[0]
    }

    /// Spectral gap (E_1 - E_0).
    pub fn gap(&self) -> f64 {
        if self.energies.len() < 2 {
            return 0.0;
        }
        self.energies[1] - self.energies[0]
    }

    /// Width of the returned part of the spectrum.
    pub fn bandwidth(&self) -> f64 {
        match (self.energies.first(), self.energies.last()) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0.0,
        }
    }

    /// V·diag(w)·Vᵀ from the stored eigenpairs.
    ///
    /// Reproduces the input matrix when the spectrum is complete.
    pub fn reconstruct(&self) -> DMatrix<f64> {
        let dim = self.states.first().map_or(0, |v| v.len());
        let mut h = DMatrix::zeros(dim, dim);
        for (&e, v) in self.energies.iter().zip(&self.states) {
            h += v * v.transpose() * e;
        }
        h
    }
}

/// Diagonalize a real symmetric matrix.
///
/// If `n_lowest` is `Some(n)`, only the `n` lowest eigenvalues/states
/// are returned (still computed via full diagonalization).
///
/// Non-finite entries are rejected before the solver runs.
pub fn diagonalize(h: &DMatrix<f64>, n_lowest: Option<usize>) -> Result<Spectrum> {
    check_finite(h)?;

    let dim = h.nrows();
    if dim == 0 {
        return Ok(Spectrum {
            energies: Vec::new(),
            states: Vec::new(),
        });
    }

    let eig = SymmetricEigen::try_new(h.clone(), f64::EPSILON, max_iterations(dim))
        .ok_or(AahError::EigenDecomposition { dim })?;

    // Sort by eigenvalue.
    let mut indexed: Vec<(usize, f64)> = eig.eigenvalues.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let n = match n_lowest {
        Some(n) => n.min(indexed.len()),
        None => indexed.len(),
    };

    let energies: Vec<f64> = indexed[..n].iter().map(|&(_, e)| e).collect();
    let states: Vec<DVector<f64>> = indexed[..n]
        .iter()
        .map(|&(i, _)| eig.eigenvectors.column(i).into_owned())
        .collect();

    Ok(Spectrum { energies, states })
}

/// Ascending eigenvalues only.
pub fn eigenvalues(h: &DMatrix<f64>) -> Result<Vec<f64>> {
    diagonalize(h, None).map(|spec| spec.energies)
}

fn check_finite(h: &DMatrix<f64>) -> Result<()> {
    for j in 0..h.ncols() {
        for i in 0..h.nrows() {
            if !h[(i, j)].is_finite() {
                return Err(AahError::NonFiniteMatrix { row: i, col: j });
            }
        }
    }
    Ok(())
}

// Implicit QR sweeps needed grow roughly linearly with the dimension.
fn max_iterations(dim: usize) -> usize {
    1000 + 100 * dim
}
