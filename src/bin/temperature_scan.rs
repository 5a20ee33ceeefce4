//! Equilibrium scan over temperature.
//!
//! Every temperature gets its own lattice and RNG stream, thermalises, then
//! records energy per site, |M|/L² and the acceptance ratio every
//! `sample_every` sweeps. Temperatures run in parallel; each lattice is still
//! swept strictly sequentially.
//
//  Run:  `cargo run --release --bin temperature_scan -- --size 32 --output scan.csv`

use std::path::PathBuf;

use clap::Parser;
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use ising::stats::OnlineStats;
use ising::utils::rng::stream_rng;
use ising::{SimError, Simulation};
use log::info;
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(about = "Temperature scan of the 2D Ising model")]
struct Cli {
    /// Lattice side length L
    #[arg(long, default_value_t = 32)]
    size: usize,

    /// Coupling J
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    coupling: f64,

    /// Temperature range (min,max,step)
    #[arg(long, default_value = "1.0,3.5,0.1", value_delimiter = ',')]
    t_range: Vec<f64>,

    /// Thermalisation sweeps discarded before sampling
    #[arg(long, default_value_t = 2_000)]
    equil: usize,

    /// Sweeps recorded after thermalisation
    #[arg(long, default_value_t = 10_000)]
    sweeps: usize,

    /// Sweeps between samples
    #[arg(long, default_value_t = 10)]
    sample_every: usize,

    /// Master seed; temperature i uses stream i
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output CSV
    #[arg(long, default_value = "temperature_scan.csv")]
    output: PathBuf,
}

/// Row to be written to CSV.
#[derive(Debug)]
struct Row {
    temperature:    f64,
    mean_energy:    f64,
    std_energy:     f64,
    mean_abs_mag:   f64,
    std_abs_mag:    f64,
    acceptance:     f64,
    specific_heat:  f64,
    susceptibility: f64,
}

fn temperatures(range: &[f64]) -> Result<Vec<f64>, SimError> {
    let [min, max, step] = range else {
        return Err(SimError::InvalidConfig(format!(
            "t_range needs exactly min,max,step, got {} values",
            range.len()
        )));
    };
    if *step <= 0.0 || max < min {
        return Err(SimError::InvalidConfig(format!(
            "t_range must satisfy min <= max and step > 0, got {min},{max},{step}"
        )));
    }
    let n = ((max - min) / step + 1e-9).floor() as usize + 1;
    Ok((0..n).map(|i| min + step * i as f64).collect())
}

fn run_one(args: &Cli, stream: usize, temperature: f64) -> Result<Row, SimError> {
    let mut rng = stream_rng(args.seed, stream);
    let mut sim = Simulation::random_with(&mut rng, args.size, temperature, args.coupling)?;
    let n_sites = sim.n_sites() as f64;

    for _ in 0..args.equil {
        sim.tick(&mut rng);
    }
    // Start the acceptance ratio after thermalisation.
    sim.set_temperature(temperature)?;

    let mut stats_e = OnlineStats::default();
    let mut stats_m = OnlineStats::default();
    for sweep in 1..=args.sweeps {
        sim.tick(&mut rng);
        if sweep % args.sample_every == 0 {
            let s = sim.state();
            stats_e.push(s.energy_per_site(sim.n_sites()));
            stats_m.push(s.magnetization_per_site(sim.n_sites()).abs());
        }
    }

    Ok(Row {
        temperature,
        mean_energy:    stats_e.mean(),
        std_energy:     stats_e.std(),
        mean_abs_mag:   stats_m.mean(),
        std_abs_mag:    stats_m.std(),
        acceptance:     sim.state().acceptance_ratio(),
        specific_heat:  n_sites * stats_e.var() / (temperature * temperature),
        susceptibility: n_sites * stats_m.var() / temperature,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Cli::parse();
    if args.sample_every == 0 {
        return Err(SimError::InvalidConfig("sample_every must be >= 1".into()).into());
    }

    let temps = temperatures(&args.t_range)?;
    println!(
        "Scanning {} temperatures on a {}x{} lattice (J = {})",
        temps.len(),
        args.size,
        args.size,
        args.coupling
    );

    let bar = ProgressBar::new(temps.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let rows = temps
        .par_iter()
        .enumerate()
        .map(|(i, &t)| {
            let row = run_one(&args, i, t);
            bar.inc(1);
            row
        })
        .collect::<Result<Vec<Row>, SimError>>()?;
    bar.finish();

    let mut wtr = WriterBuilder::new().from_path(&args.output)?;
    wtr.write_record([
        "temperature", "mean_energy", "std_energy", "mean_abs_mag", "std_abs_mag",
        "acceptance", "specific_heat", "susceptibility",
    ])?;
    for r in &rows {
        wtr.write_record(&[
            r.temperature.to_string(),
            r.mean_energy.to_string(),
            r.std_energy.to_string(),
            r.mean_abs_mag.to_string(),
            r.std_abs_mag.to_string(),
            r.acceptance.to_string(),
            r.specific_heat.to_string(),
            r.susceptibility.to_string(),
        ])?;
    }
    wtr.flush()?;
    info!("wrote {} rows", rows.len());
    println!("Scan complete → {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_grid_includes_endpoint() {
        let t = temperatures(&[1.0, 2.0, 0.25]).unwrap();
        assert_eq!(t.len(), 5);
        assert!((t[4] - 2.0).abs() < 1e-12);
        assert!(temperatures(&[1.0, 2.0]).is_err());
        assert!(temperatures(&[2.0, 1.0, 0.1]).is_err());
    }
}
