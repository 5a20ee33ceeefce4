// state.rs - Incrementally maintained scalar totals

use crate::lattice::Lattice;
use crate::observables::{total_energy, total_magnetization};

/// Value `attempted_flips` holds after construction and after every reset, so
/// the acceptance ratio is defined before the first sweep.
pub const ATTEMPT_BASELINE: u64 = 1;

/// Running totals kept in step with the lattice by the sweep engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub total_energy: f64,
    pub total_magnetization: i64,
    pub acceptance_count: u64,
    pub attempted_flips: u64,
}

impl SimulationState {
    /// Totals recomputed from scratch, counters at their baselines.
    pub fn recompute(lattice: &Lattice, coupling: f64) -> Self {
        Self {
            total_energy: total_energy(lattice, coupling),
            total_magnetization: total_magnetization(lattice),
            acceptance_count: 0,
            attempted_flips: ATTEMPT_BASELINE,
        }
    }

    /// Cached minus recomputed `(energy, magnetization)`. Both are zero (energy
    /// up to rounding) while the incremental bookkeeping is sound.
    pub fn drift(&self, lattice: &Lattice, coupling: f64) -> (f64, i64) {
        (
            self.total_energy - total_energy(lattice, coupling),
            self.total_magnetization - total_magnetization(lattice),
        )
    }

    pub fn energy_per_site(&self, n_sites: usize) -> f64 {
        self.total_energy / n_sites as f64
    }

    pub fn magnetization_per_site(&self, n_sites: usize) -> f64 {
        self.total_magnetization as f64 / n_sites as f64
    }

    /// Cumulative accepted / attempted since the last reset.
    pub fn acceptance_ratio(&self) -> f64 {
        self.acceptance_count as f64 / self.attempted_flips as f64
    }
}
