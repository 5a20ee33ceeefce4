//! Parameter changes: unconditional reset, recompute against the new J, and
//! rejected input leaving everything as it was.

use ising::{total_energy, total_magnetization, SimConfig, SimError, Simulation};
use rand::SeedableRng;
use rand_pcg::Pcg64;

fn warmed_up(seed: u64) -> (Simulation, Pcg64) {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut sim = Simulation::random_with(&mut rng, 10, 2.27, 1.0).unwrap();
    for _ in 0..25 {
        sim.tick(&mut rng);
    }
    assert!(sim.state().acceptance_count > 0);
    (sim, rng)
}

#[test]
fn test_same_temperature_still_resets() {
    let (mut sim, _) = warmed_up(1);
    let lattice_before = sim.lattice().clone();

    sim.set_temperature(2.27).unwrap();

    let s = sim.state();
    assert_eq!(s.acceptance_count, 0);
    assert_eq!(s.attempted_flips, 1);
    assert_eq!(s.total_energy, total_energy(sim.lattice(), 1.0));
    assert_eq!(s.total_magnetization, total_magnetization(sim.lattice()));
    assert_eq!(sim.lattice(), &lattice_before);
    assert_eq!(sim.readout().acceptance, 0.0);
}

#[test]
fn test_same_coupling_still_resets() {
    let (mut sim, _) = warmed_up(2);
    sim.set_coupling(1.0).unwrap();
    assert_eq!(sim.state().acceptance_count, 0);
    assert_eq!(sim.state().attempted_flips, 1);
}

#[test]
fn test_coupling_change_recomputes_with_new_coupling() {
    let (mut sim, mut rng) = warmed_up(3);
    sim.set_coupling(-0.75).unwrap();
    assert_eq!(sim.params().coupling(), -0.75);
    assert_eq!(sim.state().total_energy, total_energy(sim.lattice(), -0.75));

    // Bookkeeping stays consistent under the new functional.
    for _ in 0..50 {
        sim.tick(&mut rng);
    }
    let (de, dm) = sim.drift();
    assert!(de.abs() < 1e-9 * sim.n_sites() as f64);
    assert_eq!(dm, 0);
}

#[test]
fn test_invalid_temperature_leaves_state_untouched() {
    let (mut sim, _) = warmed_up(4);
    let state = *sim.state();
    let params = *sim.params();

    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            sim.set_temperature(bad),
            Err(SimError::InvalidParameter { name: "temperature", .. })
        ));
        assert_eq!(sim.state(), &state);
        assert_eq!(sim.params(), &params);
    }
    assert!(sim.set_coupling(f64::NAN).is_err());
    assert_eq!(sim.state(), &state);
}

#[test]
fn test_text_entry_outside_bounds_is_rejected() {
    let (mut sim, _) = warmed_up(5);
    let state = *sim.state();

    assert!(sim.apply_temperature_text("7.5").is_err());
    assert!(sim.apply_temperature_text("0.05").is_err());
    assert!(sim.apply_coupling_text("-2.5").is_err());
    assert_eq!(
        sim.apply_temperature_text("hot"),
        Err(SimError::Parse { name: "temperature", input: "hot".into() })
    );
    assert_eq!(sim.state(), &state);
    assert_eq!(sim.params().temperature(), 2.27);
    assert_eq!(sim.params().coupling(), 1.0);
}

#[test]
fn test_text_entry_inside_bounds_applies_and_resets() {
    let (mut sim, _) = warmed_up(6);

    sim.apply_temperature_text(" 1.25 ").unwrap();
    assert_eq!(sim.params().temperature(), 1.25);
    assert_eq!(sim.state().attempted_flips, 1);

    sim.apply_coupling_text("-2.0").unwrap();
    assert_eq!(sim.params().coupling(), -2.0);
    assert_eq!(sim.state().total_energy, total_energy(sim.lattice(), -2.0));
}

#[test]
fn test_construction_rejects_bad_configuration() {
    let mut rng = Pcg64::seed_from_u64(7);
    assert_eq!(
        Simulation::random_with(&mut rng, 0, 2.0, 1.0).err(),
        Some(SimError::LatticeSize(0))
    );
    assert!(Simulation::random_with(&mut rng, 8, 0.0, 1.0).is_err());

    let cfg = SimConfig { side: 1, ..SimConfig::default() };
    assert_eq!(Simulation::from_config(&cfg, &mut rng).err(), Some(SimError::LatticeSize(1)));

    let sim = Simulation::from_config(&SimConfig::default(), &mut rng).unwrap();
    assert_eq!(sim.lattice().side(), 50);
    assert_eq!(sim.params().temperature(), 2.27);
}
