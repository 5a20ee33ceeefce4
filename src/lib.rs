//! Single-spin-flip Metropolis simulation of the 2D Ising model on a periodic
//! square lattice, with incrementally maintained energy and magnetization.

pub mod config;
pub mod error;
pub mod lattice;
pub mod observables;
pub mod params;
pub mod sampler;
pub mod simulation;
pub mod state;
pub mod stats;
pub mod sweep;
pub mod utils;

pub use config::SimConfig;
pub use error::SimError;
pub use lattice::Lattice;
pub use observables::{total_energy, total_magnetization, Observable};
pub use params::{ParameterBounds, Parameters};
pub use sampler::ObservableSampler;
pub use simulation::{Readout, Simulation};
pub use state::SimulationState;
pub use sweep::{delta_energy, metropolis_sweep, BoltzmannTable, ChangeSet};
