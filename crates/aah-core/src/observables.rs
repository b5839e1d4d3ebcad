//! Localization diagnostics for AAH eigenstates.
//!
//! - Inverse participation ratio (extended ~1/N, localized ~1)
//! - Mean adjacent level-spacing ratio ⟨r⟩
//! - Site-resolved density |ψ(x,y)|²

use crate::diag::Spectrum;
use crate::lattice::Lattice;
use nalgebra::{DMatrix, DVector};

/// IPR = Σ|ψ_i|⁴ / (Σ|ψ_i|²)².
///
/// Normalization-independent. Returns 0.0 for the zero vector.
pub fn inverse_participation_ratio(state: &DVector<f64>) -> f64 {
    let norm_sq: f64 = state.iter().map(|a| a * a).sum();
    if norm_sq == 0.0 {
        return 0.0;
    }
    let quartic: f64 = state.iter().map(|a| a.powi(4)).sum();
    quartic / (norm_sq * norm_sq)
}

/// IPR averaged over every state in the spectrum.
pub fn mean_ipr(spectrum: &Spectrum) -> f64 {
    if spectrum.states.is_empty() {
        return 0.0;
    }
    let total: f64 = spectrum.states.iter().map(inverse_participation_ratio).sum();
    total / spectrum.states.len() as f64
}

/// Mean ratio of consecutive level spacings for a sorted spectrum.
///
/// r_n = min(s_n, s_{n+1}) / max(s_n, s_{n+1}); pairs with a zero spacing
/// are skipped. Returns 0.0 when fewer than three levels are given.
pub fn level_spacing_ratio(energies: &[f64]) -> f64 {
    if energies.len() < 3 {
        return 0.0;
    }

    let (sum, count) = energies
        .windows(3)
        .filter_map(|w| {
            let s1 = w[1] - w[0];
            let s2 = w[2] - w[1];
            (s1 > 0.0 && s2 > 0.0).then(|| s1.min(s2) / s1.max(s2))
        })
        .fold((0.0, 0usize), |(sum, n), r| (sum + r, n + 1));

    if count > 0 { sum / count as f64 } else { 0.0 }
}

/// |ψ|² arranged as an `lx × ly` matrix, entry (x, y).
pub fn site_density(lattice: &Lattice, state: &DVector<f64>) -> DMatrix<f64> {
    assert_eq!(state.len(), lattice.n_sites(), "state length must equal lx·ly");
    DMatrix::from_fn(lattice.lx, lattice.ly, |x, y| {
        let a = state[lattice.index(x, y)];
        a * a
    })
}
