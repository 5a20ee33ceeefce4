// simulation.rs - Caller-owned simulation: lattice, totals, parameters

use std::fmt;

use log::{debug, info, warn};
use rand::Rng;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::lattice::Lattice;
use crate::params::{ParameterBounds, Parameters};
use crate::state::SimulationState;
use crate::sweep::{metropolis_sweep, ChangeSet};

/// The engine. Owns the lattice exclusively between ticks; callers get a
/// read-only view or the per-tick change-set.
#[derive(Debug, Clone)]
pub struct Simulation {
    lattice: Lattice,
    state: SimulationState,
    params: Parameters,
    bounds: ParameterBounds,
}

/// The three "current values" a UI shows next to the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub acceptance: f64,
    pub energy_per_site: f64,
    pub magnetization_per_site: f64,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Acceptance: {:.3}", self.acceptance)?;
        writeln!(f, "Energy / (L^2 J): {:.3}", self.energy_per_site)?;
        write!(f, "Magnetization (M/L^2): {:.3}", self.magnetization_per_site)
    }
}

impl Simulation {
    /// Wrap an existing lattice; totals are computed from scratch.
    pub fn new(lattice: Lattice, params: Parameters) -> Self {
        let state = SimulationState::recompute(&lattice, params.coupling());
        info!(
            "simulation: L = {}, T = {}, J = {}, E = {}, M = {}",
            lattice.side(),
            params.temperature(),
            params.coupling(),
            state.total_energy,
            state.total_magnetization
        );
        Self {
            lattice,
            state,
            params,
            bounds: ParameterBounds::default(),
        }
    }

    /// Random initial spins from a caller-supplied RNG.
    pub fn random_with(
        rng: &mut impl Rng,
        side: usize,
        temperature: f64,
        coupling: f64,
    ) -> Result<Self, SimError> {
        let params = Parameters::new(temperature, coupling)?;
        let lattice = Lattice::random_with(rng, side)?;
        Ok(Self::new(lattice, params))
    }

    pub fn from_config(cfg: &SimConfig, rng: &mut impl Rng) -> Result<Self, SimError> {
        cfg.validate()?;
        Ok(Self::random_with(rng, cfg.side, cfg.temperature, cfg.coupling)?
            .with_bounds(cfg.bounds.clone()))
    }

    /// Replace the ranges used by the text-entry path.
    pub fn with_bounds(mut self, bounds: ParameterBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn bounds(&self) -> &ParameterBounds {
        &self.bounds
    }

    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.lattice.n_sites()
    }

    /// Advance by exactly one sweep.
    pub fn tick(&mut self, rng: &mut impl Rng) -> ChangeSet {
        metropolis_sweep(&mut self.lattice, &mut self.state, &self.params, rng)
    }

    /// Set T. Any successful call resets, even if `temperature` equals the
    /// current value. An invalid T leaves everything untouched.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<(), SimError> {
        let params = self.params.with_temperature(temperature).map_err(rejected)?;
        self.params = params;
        self.reset();
        Ok(())
    }

    /// Set J; same contract as `set_temperature`.
    pub fn set_coupling(&mut self, coupling: f64) -> Result<(), SimError> {
        let params = self.params.with_coupling(coupling).map_err(rejected)?;
        self.params = params;
        self.reset();
        Ok(())
    }

    /// Text-entry path: parse, check against the bounds, then `set_temperature`.
    pub fn apply_temperature_text(&mut self, text: &str) -> Result<(), SimError> {
        let t = self.bounds.parse_temperature(text).map_err(rejected)?;
        self.set_temperature(t)
    }

    pub fn apply_coupling_text(&mut self, text: &str) -> Result<(), SimError> {
        let j = self.bounds.parse_coupling(text).map_err(rejected)?;
        self.set_coupling(j)
    }

    /// Zero the counters and rebuild the totals against the current J.
    fn reset(&mut self) {
        self.state = SimulationState::recompute(&self.lattice, self.params.coupling());
        debug!(
            "reset: T = {}, J = {}, E = {}, M = {}",
            self.params.temperature(),
            self.params.coupling(),
            self.state.total_energy,
            self.state.total_magnetization
        );
    }

    pub fn readout(&self) -> Readout {
        let n = self.n_sites();
        Readout {
            acceptance: self.state.acceptance_ratio(),
            energy_per_site: self.state.energy_per_site(n),
            magnetization_per_site: self.state.magnetization_per_site(n),
        }
    }

    /// Cached minus recomputed totals, see `SimulationState::drift`.
    pub fn drift(&self) -> (f64, i64) {
        self.state.drift(&self.lattice, self.params.coupling())
    }
}

fn rejected(e: SimError) -> SimError {
    warn!("parameter change rejected: {e}");
    e
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_format() {
        let r = Readout {
            acceptance: 0.25,
            energy_per_site: -1.5,
            magnetization_per_site: 0.0322,
        };
        assert_eq!(
            r.to_string(),
            "Acceptance: 0.250\nEnergy / (L^2 J): -1.500\nMagnetization (M/L^2): 0.032"
        );
    }
}
