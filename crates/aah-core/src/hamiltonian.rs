//! Two-dimensional Aubry-André-Harper Hamiltonian.
//!
//!   H = Σ_{x,y} V(x,y) |x,y⟩⟨x,y| + Σ_⟨nn⟩ t (|x,y⟩⟨x',y'| + h.c.)
//!
//! with the quasi-periodic on-site modulation
//!
//!   V(x,y) = λx sin(2π αx x + φx) + λy sin(2π αy y + φy)
//!
//! on an `lx × ly` lattice with independently open or periodic boundaries.
//! All couplings are real, so H is real symmetric.

use crate::error::Result;
use crate::lattice::{Axis, Lattice};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Parameters for the 2D AAH Hamiltonian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AahParams {
    /// Sites along x.
    #[serde(alias = "Lx")]
    pub lx: usize,
    /// Sites along y.
    #[serde(alias = "Ly")]
    pub ly: usize,
    /// Nearest-neighbour hopping amplitude.
    pub t: f64,
    /// Hopping override along x. `None` uses `t`.
    #[serde(alias = "tx", skip_serializing_if = "Option::is_none")]
    pub t_x: Option<f64>,
    /// Hopping override along y. `None` uses `t`.
    #[serde(alias = "ty", skip_serializing_if = "Option::is_none")]
    pub t_y: Option<f64>,
    /// Modulation amplitude along x.
    #[serde(alias = "lamx")]
    pub lam_x: f64,
    /// Modulation amplitude along y.
    #[serde(alias = "lamy")]
    pub lam_y: f64,
    /// Modulation frequency along x.
    #[serde(alias = "alphax")]
    pub alpha_x: f64,
    /// Modulation frequency along y.
    #[serde(alias = "alphay")]
    pub alpha_y: f64,
    /// Phase offset along x.
    #[serde(alias = "phix")]
    pub phi_x: f64,
    /// Phase offset along y.
    #[serde(alias = "phiy")]
    pub phi_y: f64,
    pub periodic_x: bool,
    pub periodic_y: bool,
}

impl Default for AahParams {
    fn default() -> Self {
        Self {
            lx: 8,
            ly: 8,
            t: 1.0,
            t_x: None,
            t_y: None,
            lam_x: 3.5,
            lam_y: 3.5,
            alpha_x: 1.0 / 8.0,
            alpha_y: 1.0 / 8.0,
            phi_x: 0.0,
            phi_y: 0.0,
            periodic_x: false,
            periodic_y: false,
        }
    }
}

impl AahParams {
    /// Default parameters on an `lx × ly` lattice.
    pub fn new(lx: usize, ly: usize) -> Self {
        Self {
            lx,
            ly,
            ..Self::default()
        }
    }

    /// Validated lattice for these dimensions.
    pub fn lattice(&self) -> Result<Lattice> {
        Lattice::new(self.lx, self.ly)
    }

    /// Hopping amplitude along `axis`.
    pub fn hopping(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.t_x.unwrap_or(self.t),
            Axis::Y => self.t_y.unwrap_or(self.t),
        }
    }

    pub fn boundary(&self) -> Boundary {
        Boundary::from_flags(self.periodic_x, self.periodic_y)
    }

    /// Copy with `phi_x` replaced.
    pub fn with_phi_x(&self, phi_x: f64) -> Self {
        Self {
            phi_x,
            ..self.clone()
        }
    }
}

/// Boundary conditions as a single label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Open,
    PeriodicX,
    PeriodicY,
    PeriodicXY,
}

impl Boundary {
    pub fn from_flags(periodic_x: bool, periodic_y: bool) -> Self {
        match (periodic_x, periodic_y) {
            (false, false) => Boundary::Open,
            (true, false) => Boundary::PeriodicX,
            (false, true) => Boundary::PeriodicY,
            (true, true) => Boundary::PeriodicXY,
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Open => write!(f, "open"),
            Boundary::PeriodicX => write!(f, "periodic in x"),
            Boundary::PeriodicY => write!(f, "periodic in y"),
            Boundary::PeriodicXY => write!(f, "periodic in x & y"),
        }
    }
}

/// On-site potential V(x, y).
#[inline]
pub fn onsite_potential(params: &AahParams, x: usize, y: usize) -> f64 {
    params.lam_x * (TAU * params.alpha_x * x as f64 + params.phi_x).sin()
        + params.lam_y * (TAU * params.alpha_y * y as f64 + params.phi_y).sin()
}

/// Build the 2D AAH Hamiltonian as a dense `N × N` matrix, N = lx·ly.
///
/// Fails only for a zero lattice dimension. Non-finite parameters are
/// written into the matrix as-is.
pub fn build_hamiltonian(params: &AahParams) -> Result<DMatrix<f64>> {
    let lattice = params.lattice()?;
    let dim = lattice.n_sites();
    let mut h = DMatrix::zeros(dim, dim);

    add_onsite_term(&mut h, &lattice, params);
    add_hopping_term(&mut h, &lattice, params);

    Ok(h)
}

/// Diagonal: H[i,i] = V(x,y).
fn add_onsite_term(h: &mut DMatrix<f64>, lattice: &Lattice, params: &AahParams) {
    for (x, y) in lattice.sites() {
        let i = lattice.index(x, y);
        h[(i, i)] = onsite_potential(params, x, y);
    }
}

/// Off-diagonal: H[i,j] = H[j,i] = t for every nearest-neighbour bond.
///
/// Entries are assigned rather than accumulated, so a wraparound bond that
/// coincides with a direct bond (axis of length 2) still carries exactly `t`.
fn add_hopping_term(h: &mut DMatrix<f64>, lattice: &Lattice, params: &AahParams) {
    for (i, j, axis) in lattice.bonds(params.periodic_x, params.periodic_y) {
        let t = params.hopping(axis);
        h[(i, j)] = t;
        h[(j, i)] = t;
    }
}
