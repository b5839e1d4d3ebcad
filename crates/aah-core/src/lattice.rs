//! Finite rectangular lattice and its single-particle basis.
//!
//! Sites are labelled `(x, y)` with `0 ≤ x < lx`, `0 ≤ y < ly`. The basis
//! index is row-major with `y` varying fastest:
//!
//!   i = x·ly + y
//!
//! Both the on-site and the hopping terms of the Hamiltonian go through
//! this mapping, so any reordering has to happen here and nowhere else.

use crate::error::{AahError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Map 2D coordinates `(x, y)` to the linear basis index.
#[inline]
pub fn idx(x: usize, y: usize, lx: usize, ly: usize) -> usize {
    debug_assert!(x < lx && y < ly, "site ({x}, {y}) outside {lx}x{ly} lattice");
    x * ly + y
}

/// Lattice axis of a nearest-neighbour bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// An `lx × ly` rectangular lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    pub lx: usize,
    pub ly: usize,
}

impl Lattice {
    /// Build a lattice; both dimensions must be positive.
    pub fn new(lx: usize, ly: usize) -> Result<Self> {
        if lx == 0 || ly == 0 {
            return Err(AahError::InvalidDimension { lx, ly });
        }
        Ok(Self { lx, ly })
    }

    /// Number of sites N = lx·ly.
    pub fn n_sites(&self) -> usize {
        self.lx * self.ly
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        idx(x, y, self.lx, self.ly)
    }

    /// Inverse of [`Lattice::index`].
    pub fn coords(&self, i: usize) -> (usize, usize) {
        debug_assert!(i < self.n_sites());
        (i / self.ly, i % self.ly)
    }

    /// All sites `(x, y)` in basis order.
    pub fn sites(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.lx).flat_map(move |x| (0..self.ly).map(move |y| (x, y)))
    }

    /// Nearest-neighbour bonds `(i, j, axis)` with `i < j`, each listed once.
    ///
    /// Along y: `(x, y)–(x, y+1)` within every row, plus `(x, ly-1)–(x, 0)`
    /// when `periodic_y` and `ly > 1`. Along x: `(x, y)–(x+1, y)` within
    /// every column, plus `(lx-1, y)–(0, y)` when `periodic_x` and `lx > 1`.
    ///
    /// For an axis of length 2 the wraparound bond is the direct bond; it is
    /// kept only once.
    pub fn bonds(&self, periodic_x: bool, periodic_y: bool) -> Vec<(usize, usize, Axis)> {
        let (lx, ly) = (self.lx, self.ly);
        let mut bonds = Vec::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        let mut push = |a: usize, b: usize, axis: Axis| {
            let (i, j) = if a < b { (a, b) } else { (b, a) };
            if seen.insert((i, j)) {
                bonds.push((i, j, axis));
            }
        };

        // Along y (neighbours within each row).
        for x in 0..lx {
            for y in 0..ly.saturating_sub(1) {
                push(self.index(x, y), self.index(x, y + 1), Axis::Y);
            }
            if periodic_y && ly > 1 {
                push(self.index(x, ly - 1), self.index(x, 0), Axis::Y);
            }
        }

        // Along x (neighbours between rows).
        for x in 0..lx.saturating_sub(1) {
            for y in 0..ly {
                push(self.index(x, y), self.index(x + 1, y), Axis::X);
            }
        }
        if periodic_x && lx > 1 {
            for y in 0..ly {
                push(self.index(lx - 1, y), self.index(0, y), Axis::X);
            }
        }

        bonds
    }
}
