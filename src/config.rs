// config.rs - Run configuration (single source of truth for defaults)

use crate::error::SimError;
use crate::lattice::MIN_SIDE;
use crate::observables::Observable;
use crate::params::{ParameterBounds, Parameters};
use crate::sampler::{ObservableSampler, DEFAULT_CAPACITY, DEFAULT_SAMPLE_EVERY};

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub side:             usize,
    pub temperature:      f64,
    pub coupling:         f64,
    /// `None` seeds from OS entropy.
    pub seed:             Option<u64>,
    pub sample_every:     usize,
    pub history_capacity: usize,
    pub observable:       Observable,
    pub bounds:           ParameterBounds,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            side:             50,
            temperature:      2.27,
            coupling:         1.0,
            seed:             None,
            sample_every:     DEFAULT_SAMPLE_EVERY,
            history_capacity: DEFAULT_CAPACITY,
            observable:       Observable::Magnetization,
            bounds:           ParameterBounds::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.side < MIN_SIDE {
            return Err(SimError::LatticeSize(self.side));
        }
        Parameters::new(self.temperature, self.coupling)?;
        if self.sample_every == 0 {
            return Err(SimError::InvalidConfig("sample_every must be >= 1".into()));
        }
        if self.history_capacity == 0 {
            return Err(SimError::InvalidConfig("history_capacity must be >= 1".into()));
        }
        Ok(())
    }

    pub fn sampler(&self) -> Result<ObservableSampler, SimError> {
        ObservableSampler::new(self.observable, self.history_capacity, self.sample_every)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        let sampler = cfg.sampler().unwrap();
        assert_eq!(sampler.capacity(), 100);
        assert_eq!(sampler.sample_every(), 8);
    }

    #[test]
    fn test_validate_catches_each_field() {
        let bad = SimConfig { side: 0, ..SimConfig::default() };
        assert_eq!(bad.validate(), Err(SimError::LatticeSize(0)));

        let bad = SimConfig { temperature: 0.0, ..SimConfig::default() };
        assert!(matches!(bad.validate(), Err(SimError::InvalidParameter { .. })));

        let bad = SimConfig { sample_every: 0, ..SimConfig::default() };
        assert!(matches!(bad.validate(), Err(SimError::InvalidConfig(_))));

        let bad = SimConfig { history_capacity: 0, ..SimConfig::default() };
        assert!(matches!(bad.validate(), Err(SimError::InvalidConfig(_))));
    }
}
