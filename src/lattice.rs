// lattice.rs - Periodic L×L spin lattice

use crate::error::SimError;
use rand::Rng;

/// Smallest side length with four distinct periodic neighbors per site.
pub const MIN_SIDE: usize = 2;

const UP: usize = 0;
const DOWN: usize = 1;
const LEFT: usize = 2;
const RIGHT: usize = 3;

/// Square lattice of ±1 spins with toroidal wrap.
///
/// Site `(x, y)` is row `x`, column `y`, stored row-major at `x * side + y`.
/// Neighbors are precomputed once; the sweep never does modular arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    side: usize,
    spins: Vec<i8>,
    /// `neighbors[i] = [up, down, left, right]` as flat indices.
    neighbors: Vec<[u32; 4]>,
}

impl Lattice {
    /// Independent, uniformly random spins drawn from a caller-supplied RNG.
    pub fn random_with(rng: &mut impl Rng, side: usize) -> Result<Self, SimError> {
        check_side(side)?;
        let spins = (0..side * side)
            .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
            .collect();
        Ok(Self::build(side, spins))
    }

    /// Convenience wrapper that uses `thread_rng`.
    pub fn random(side: usize) -> Result<Self, SimError> {
        let mut rng = rand::thread_rng();
        Self::random_with(&mut rng, side)
    }

    /// Every site set to `spin`.
    pub fn filled(side: usize, spin: i8) -> Result<Self, SimError> {
        check_side(side)?;
        check_spin(spin)?;
        Ok(Self::build(side, vec![spin; side * side]))
    }

    /// Row-major spins, e.g. a known configuration in a test.
    pub fn from_spins(side: usize, spins: Vec<i8>) -> Result<Self, SimError> {
        check_side(side)?;
        if spins.len() != side * side {
            return Err(SimError::InvalidConfig(format!(
                "expected {} spins for side {side}, got {}",
                side * side,
                spins.len()
            )));
        }
        for &s in &spins {
            check_spin(s)?;
        }
        Ok(Self::build(side, spins))
    }

    fn build(side: usize, spins: Vec<i8>) -> Self {
        let wrap = |c: usize, delta: isize| (c as isize + delta).rem_euclid(side as isize) as usize;
        let mut neighbors = Vec::with_capacity(side * side);
        for x in 0..side {
            for y in 0..side {
                let mut nb = [0u32; 4];
                nb[UP] = (wrap(x, -1) * side + y) as u32;
                nb[DOWN] = (wrap(x, 1) * side + y) as u32;
                nb[LEFT] = (x * side + wrap(y, -1)) as u32;
                nb[RIGHT] = (x * side + wrap(y, 1)) as u32;
                neighbors.push(nb);
            }
        }
        Self { side, spins, neighbors }
    }

    /// Side length L.
    #[inline(always)]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of sites, L².
    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.side + y
    }

    #[inline(always)]
    pub fn spin(&self, x: usize, y: usize) -> i8 {
        self.spins[self.index(x, y)]
    }

    /// Read-only row-major view of all spins.
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    /// One slice per lattice row.
    pub fn rows(&self) -> impl Iterator<Item = &[i8]> + '_ {
        self.spins.chunks(self.side)
    }

    /// Sum of the four periodic neighbors of site `(x, y)`.
    #[inline]
    pub fn neighbor_sum(&self, x: usize, y: usize) -> i32 {
        self.neighbor_sum_at(self.index(x, y))
    }

    #[inline]
    pub(crate) fn neighbor_sum_at(&self, i: usize) -> i32 {
        self.neighbors[i]
            .iter()
            .map(|&j| self.spins[j as usize] as i32)
            .sum()
    }

    /// Flat indices of the neighbors below and to the right of site `i`.
    #[inline]
    pub(crate) fn forward_neighbors(&self, i: usize) -> (usize, usize) {
        let nb = &self.neighbors[i];
        (nb[DOWN] as usize, nb[RIGHT] as usize)
    }

    /// Negate the spin at flat index `i` and return its new value.
    #[inline]
    pub(crate) fn flip_at(&mut self, i: usize) -> i8 {
        self.spins[i] = -self.spins[i];
        self.spins[i]
    }
}

fn check_side(side: usize) -> Result<(), SimError> {
    if side < MIN_SIDE {
        return Err(SimError::LatticeSize(side));
    }
    Ok(())
}

fn check_spin(spin: i8) -> Result<(), SimError> {
    if spin != 1 && spin != -1 {
        return Err(SimError::InvalidParameter {
            name: "spin",
            value: spin as f64,
            reason: "must be -1 or +1",
        });
    }
    Ok(())
}
