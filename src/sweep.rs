// sweep.rs - Single-spin-flip Metropolis sweep with incremental bookkeeping

use rand::Rng;

use crate::lattice::Lattice;
use crate::params::Parameters;
use crate::state::SimulationState;

/// Energy change of flipping a spin whose four neighbors sum to `neighbor_sum`.
#[inline]
pub fn delta_energy(spin: i8, neighbor_sum: i32, coupling: f64) -> f64 {
    2.0 * coupling * (spin as i32 * neighbor_sum) as f64
}

/// dE and `exp(-dE/T)` for the five possible values of `s·S` (-4, -2, 0, 2, 4).
///
/// Built once per sweep, so the inner loop does no transcendental math. For
/// dE <= 0 the probability is >= 1 (possibly +inf when T is tiny), which makes
/// `r < p` accept unconditionally; for dE > 0 and tiny T it underflows to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltzmannTable {
    delta: [f64; 5],
    probability: [f64; 5],
}

impl BoltzmannTable {
    pub fn new(params: &Parameters) -> Self {
        let mut delta = [0.0; 5];
        let mut probability = [0.0; 5];
        for k in 0..5 {
            let local = 2 * k as i32 - 4;
            let de = delta_energy(1, local, params.coupling());
            delta[k] = de;
            probability[k] = (-de / params.temperature()).exp();
        }
        Self { delta, probability }
    }

    #[inline(always)]
    fn slot(local: i32) -> usize {
        debug_assert!(local % 2 == 0 && (-4..=4).contains(&local));
        ((local + 4) / 2) as usize
    }

    /// dE for `local = s·S`.
    #[inline(always)]
    pub fn delta_energy(&self, local: i32) -> f64 {
        self.delta[Self::slot(local)]
    }

    /// Acceptance threshold for `local = s·S`.
    #[inline(always)]
    pub fn probability(&self, local: i32) -> f64 {
        self.probability[Self::slot(local)]
    }
}

/// Sites whose spin was flipped during one sweep, in acceptance order.
///
/// A site flipped twice appears twice; a renderer that reads the current spin
/// at each listed site ends up with the right picture either way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    sites: Vec<(usize, usize)>,
}

impl ChangeSet {
    pub fn sites(&self) -> &[(usize, usize)] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sites.iter().copied()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a (usize, usize);
    type IntoIter = std::slice::Iter<'a, (usize, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

/// One sweep: L² independent flip attempts at uniformly random sites.
///
/// Sites may be drawn more than once or not at all. Every attempt consumes two
/// index draws and one uniform `r` in [0, 1); the flip is accepted iff
/// `r < exp(-dE/T)`. Accepted flips update energy, magnetization and the
/// acceptance count in place; `attempted_flips` grows by L² per call.
pub fn metropolis_sweep(
    lattice: &mut Lattice,
    state: &mut SimulationState,
    params: &Parameters,
    rng: &mut impl Rng,
) -> ChangeSet {
    let side = lattice.side();
    let n_sites = lattice.n_sites();
    let table = BoltzmannTable::new(params);
    let mut changes = ChangeSet { sites: Vec::new() };

    state.attempted_flips += n_sites as u64;

    for _ in 0..n_sites {
        let x = rng.gen_range(0..side);
        let y = rng.gen_range(0..side);
        let i = lattice.index(x, y);

        let local = lattice.spins()[i] as i32 * lattice.neighbor_sum_at(i);

        if rng.gen::<f64>() < table.probability(local) {
            let new_spin = lattice.flip_at(i);
            state.acceptance_count += 1;
            state.total_energy += table.delta_energy(local);
            state.total_magnetization += 2 * new_spin as i64;
            changes.sites.push((x, y));
        }
    }

    changes
}
