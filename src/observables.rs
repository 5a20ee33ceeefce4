// observables.rs - Full-lattice observables and the tracked-observable selector

use std::fmt;
use std::str::FromStr;

use crate::error::SimError;
use crate::lattice::Lattice;
use crate::state::SimulationState;

/// Total energy `E = -J Σ_i s_i (s_down(i) + s_right(i))`.
///
/// Each bond is visited once through its forward end. O(L²); only called at
/// construction and on reset, the sweep keeps the total up to date with dE.
pub fn total_energy(lattice: &Lattice, coupling: f64) -> f64 {
    let spins = lattice.spins();
    let bonds: i64 = (0..lattice.n_sites())
        .map(|i| {
            let (down, right) = lattice.forward_neighbors(i);
            spins[i] as i64 * (spins[down] as i64 + spins[right] as i64)
        })
        .sum();
    -coupling * bonds as f64
}

/// Σ s_i.
pub fn total_magnetization(lattice: &Lattice) -> i64 {
    lattice.spins().iter().map(|&s| s as i64).sum()
}

/// The scalar the sampler tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Observable {
    Energy,
    #[default]
    Magnetization,
    Acceptance,
}

impl Observable {
    pub const ALL: [Observable; 3] = [
        Observable::Magnetization,
        Observable::Energy,
        Observable::Acceptance,
    ];

    /// Instantaneous value, normalised per site (or per attempt).
    pub fn evaluate(self, state: &SimulationState, n_sites: usize) -> f64 {
        match self {
            Observable::Energy => state.energy_per_site(n_sites),
            Observable::Magnetization => state.magnetization_per_site(n_sites),
            Observable::Acceptance => state.acceptance_ratio(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Observable::Energy => "Energy",
            Observable::Magnetization => "Magnetization",
            Observable::Acceptance => "Acceptance",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Observable::Energy => "Energy / (L^2 J)",
            Observable::Magnetization => "Magnetization (M/L^2)",
            Observable::Acceptance => "Acceptance",
        }
    }

    /// Fixed y-range a plot of this observable uses.
    pub fn axis_range(self) -> (f64, f64) {
        match self {
            Observable::Energy => (-2.0, 2.0),
            Observable::Magnetization => (-1.0, 1.0),
            Observable::Acceptance => (0.0, 1.0),
        }
    }

    pub fn title(self) -> String {
        format!("Live {} Vs. Time", self.label())
    }
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Observable {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "energy" => Ok(Observable::Energy),
            "magnetization" | "magnetisation" => Ok(Observable::Magnetization),
            "acceptance" => Ok(Observable::Acceptance),
            _ => Err(SimError::Parse { name: "observable", input: s.to_string() }),
        }
    }
}
