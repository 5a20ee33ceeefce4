// sampler.rs - Rolling history of one observable, sampled every few ticks

use std::collections::VecDeque;

use log::debug;

use crate::error::SimError;
use crate::observables::Observable;
use crate::state::SimulationState;

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_SAMPLE_EVERY: usize = 8;

/// Fixed-capacity FIFO of the selected observable, oldest first.
#[derive(Debug, Clone)]
pub struct ObservableSampler {
    observable: Observable,
    history: VecDeque<f64>,
    capacity: usize,
    sample_every: usize,
    ticks: usize,
}

impl Default for ObservableSampler {
    fn default() -> Self {
        Self {
            observable: Observable::default(),
            history: VecDeque::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            sample_every: DEFAULT_SAMPLE_EVERY,
            ticks: 0,
        }
    }
}

impl ObservableSampler {
    pub fn new(
        observable: Observable,
        capacity: usize,
        sample_every: usize,
    ) -> Result<Self, SimError> {
        if capacity == 0 {
            return Err(SimError::InvalidConfig("history capacity must be >= 1".into()));
        }
        if sample_every == 0 {
            return Err(SimError::InvalidConfig("sample_every must be >= 1".into()));
        }
        Ok(Self {
            observable,
            history: VecDeque::with_capacity(capacity),
            capacity,
            sample_every,
            ticks: 0,
        })
    }

    pub fn observable(&self) -> Observable {
        self.observable
    }

    /// Track `observable` from the next sample on. Always empties the history,
    /// even when re-selecting the current observable.
    pub fn select(&mut self, observable: Observable) {
        debug!("sampler: tracking {observable}, history cleared");
        self.observable = observable;
        self.history.clear();
    }

    /// Called once per sweep; evaluates and records the observable on every
    /// `sample_every`-th call and returns the recorded value.
    pub fn on_tick(&mut self, state: &SimulationState, n_sites: usize) -> Option<f64> {
        self.ticks = (self.ticks + 1) % self.sample_every;
        if self.ticks != 0 {
            return None;
        }
        let value = self.observable.evaluate(state, n_sites);
        self.push(value);
        Some(value)
    }

    /// Append one value, evicting the oldest once full.
    pub fn push(&mut self, value: f64) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    pub fn values(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// History followed by zeros, always `capacity` long.
    pub fn padded(&self) -> Vec<f64> {
        let mut out = self.values();
        out.resize(self.capacity, 0.0);
        out
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn sample_every(&self) -> usize {
        self.sample_every
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
