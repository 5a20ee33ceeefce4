//! Observable sampler: FIFO capacity, cadence, selection, and the formulas.

use ising::{Observable, ObservableSampler, Simulation};
use rand::SeedableRng;
use rand_pcg::Pcg64;

#[test]
fn test_keeps_last_hundred_in_order() {
    let mut sampler = ObservableSampler::default();
    for i in 0..150 {
        sampler.push(i as f64);
    }
    assert_eq!(sampler.len(), 100);
    let expected: Vec<f64> = (50..150).map(|i| i as f64).collect();
    assert_eq!(sampler.values(), expected);
}

#[test]
fn test_samples_every_eighth_tick() {
    let mut rng = Pcg64::seed_from_u64(1);
    let mut sim = Simulation::random_with(&mut rng, 8, 2.27, 1.0).unwrap();
    let mut sampler = ObservableSampler::default();

    let mut sampled_at = Vec::new();
    for tick in 1..=20 {
        sim.tick(&mut rng);
        if let Some(v) = sampler.on_tick(sim.state(), sim.n_sites()) {
            assert_eq!(v, sim.state().magnetization_per_site(sim.n_sites()));
            sampled_at.push(tick);
        }
    }
    assert_eq!(sampled_at, vec![8, 16]);
    assert_eq!(sampler.len(), 2);
}

#[test]
fn test_selecting_clears_history() {
    let mut rng = Pcg64::seed_from_u64(2);
    let mut sim = Simulation::random_with(&mut rng, 8, 2.27, 1.0).unwrap();
    let mut sampler = ObservableSampler::new(Observable::Magnetization, 100, 1).unwrap();

    for _ in 0..5 {
        sim.tick(&mut rng);
        sampler.on_tick(sim.state(), sim.n_sites());
    }
    assert_eq!(sampler.len(), 5);

    sampler.select(Observable::Energy);
    assert!(sampler.is_empty());
    assert_eq!(sampler.observable(), Observable::Energy);

    sim.tick(&mut rng);
    let v = sampler.on_tick(sim.state(), sim.n_sites()).unwrap();
    assert_eq!(v, sim.state().total_energy / 64.0);
    assert_eq!(sampler.values(), vec![v]);

    // Re-selecting the same observable clears too.
    sampler.select(Observable::Energy);
    assert!(sampler.is_empty());
}

#[test]
fn test_observable_formulas() {
    let mut rng = Pcg64::seed_from_u64(3);
    let mut sim = Simulation::random_with(&mut rng, 12, 2.0, 1.0).unwrap();
    let n = sim.n_sites();

    // Before any sweep: 0 accepted out of the baseline of 1.
    assert_eq!(Observable::Acceptance.evaluate(sim.state(), n), 0.0);

    for _ in 0..10 {
        sim.tick(&mut rng);
    }
    let s = *sim.state();
    assert_eq!(Observable::Energy.evaluate(&s, n), s.total_energy / 144.0);
    assert_eq!(
        Observable::Magnetization.evaluate(&s, n),
        s.total_magnetization as f64 / 144.0
    );
    assert_eq!(
        Observable::Acceptance.evaluate(&s, n),
        s.acceptance_count as f64 / s.attempted_flips as f64
    );

    let r = sim.readout();
    assert_eq!(r.energy_per_site, Observable::Energy.evaluate(&s, n));
    assert_eq!(r.magnetization_per_site, Observable::Magnetization.evaluate(&s, n));
    assert_eq!(r.acceptance, Observable::Acceptance.evaluate(&s, n));
}

#[test]
fn test_per_site_values_stay_in_axis_range() {
    let mut rng = Pcg64::seed_from_u64(4);
    let mut sim = Simulation::random_with(&mut rng, 16, 1.5, 1.0).unwrap();
    for _ in 0..100 {
        sim.tick(&mut rng);
        for obs in Observable::ALL {
            let v = obs.evaluate(sim.state(), sim.n_sites());
            let (lo, hi) = obs.axis_range();
            assert!((lo..=hi).contains(&v), "{obs} = {v} outside [{lo}, {hi}]");
        }
    }
}
