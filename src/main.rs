//! Kepler - command-line front end
//!
//! Runs one preset scenario, logs the Kepler I / Kepler II reports and the
//! drift summary, and optionally writes the trajectory, the drift series and
//! the perihelion passages as tab-separated tables.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kepler_laws::analysis::{AreaSweepAnalyzer, FocalDistanceAnalyzer, Sampling};
use kepler_laws::diagnostics::DriftSeries;
use kepler_laws::elements::OrbitalElements;
use kepler_laws::physics::{IntegrationScheme, OrbitConfig};
use kepler_laws::scenarios::{self, Scenario, SCENARIOS};
use kepler_laws::trajectory::Trajectory;
use kepler_laws::types::{METERS_TO_AU, SECONDS_PER_DAY};
use kepler_laws::{KeplerError, Result};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scheme {
    SemiImplicit,
    Explicit,
}

impl From<Scheme> for IntegrationScheme {
    fn from(scheme: Scheme) -> Self {
        match scheme {
            Scheme::SemiImplicit => Self::SemiImplicitEuler,
            Scheme::Explicit => Self::ExplicitEuler,
        }
    }
}

/// Integrate a two-body orbit and check it against Kepler's laws.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Preset scenario to run.
    #[arg(default_value = "first_law")]
    scenario: String,

    /// List the available scenarios and exit.
    #[arg(long)]
    list: bool,

    /// Override the time step (seconds).
    #[arg(short = 'd', long)]
    dt: Option<f64>,

    /// Override the integration scheme.
    #[arg(long, value_enum)]
    scheme: Option<Scheme>,

    /// Override the iteration cap.
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Step between sampled fractions (percent of the run).
    #[arg(long, default_value_t = 0.2)]
    sample_step: f64,

    /// Write the trajectory as a tab-separated table.
    #[arg(long)]
    trajectory_out: Option<PathBuf>,

    /// Write the drift series as a tab-separated table.
    #[arg(long)]
    drift_out: Option<PathBuf>,

    /// Write the detected perihelion passages as a tab-separated table.
    #[arg(long)]
    perihelia_out: Option<PathBuf>,
}

impl Cli {
    fn config(&self, scenario: &Scenario) -> OrbitConfig {
        let base = scenario.config;
        OrbitConfig {
            dt: self.dt.unwrap_or(base.dt),
            scheme: self.scheme.map_or(base.scheme, Into::into),
            max_iterations: self.max_iterations.unwrap_or(base.max_iterations),
            ..base
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.list {
        for s in SCENARIOS {
            println!("{:<16} {:<22} {}", s.id, s.name, s.description);
        }
        return ExitCode::SUCCESS;
    }

    let Some(scenario) = scenarios::find(&cli.scenario) else {
        error!(id = %cli.scenario, "Unknown scenario (use --list)");
        return ExitCode::FAILURE;
    };

    match run(&cli, scenario) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, scenario: &Scenario) -> Result<()> {
    let config = cli.config(scenario);
    let sampling = Sampling {
        step: cli.sample_step,
        ..Default::default()
    };
    info!(scenario = scenario.id, "{}", scenario.description);

    if let Some(el) =
        OrbitalElements::from_state(config.initial_position, config.initial_velocity, config.gm())
    {
        info!(
            semi_major_axis_au = el.semi_major_axis * METERS_TO_AU,
            eccentricity = el.eccentricity,
            period_days = el.period.map(|t| t / SECONDS_PER_DAY),
            "Analytic orbit"
        );
    }

    let trajectory = Trajectory::simulate(&config)?;
    if !trajectory.status().is_converged() {
        warn!("Reports below describe a partial orbit");
    }

    let focal = FocalDistanceAnalyzer::new(&trajectory);
    let secondary = focal.foci().secondary * METERS_TO_AU;
    let kepler_one = focal.report(&sampling)?;
    info!(
        focus_x_au = secondary.x,
        focus_y_au = secondary.y,
        min_au = kepler_one.minimum * METERS_TO_AU,
        max_au = kepler_one.maximum * METERS_TO_AU,
        relative_deviation = kepler_one.relative_deviation,
        "Kepler I: focal-distance sum"
    );

    let kepler_two = AreaSweepAnalyzer::new(&trajectory).report(&sampling);
    match kepler_two {
        Ok(report) => info!(
            min = report.minimum,
            max = report.maximum,
            relative_deviation = report.relative_deviation,
            "Kepler II: swept area per step"
        ),
        // The coarsest samplings can land on the final sample
        Err(err @ KeplerError::IndexOutOfRange { .. }) => warn!("Kepler II skipped: {err}"),
        Err(err) => return Err(err),
    }

    let drift = DriftSeries::from_trajectory(&trajectory, &config, &scenario.drift);
    if let (Some(energy), Some(momentum)) = (drift.energy_report(), drift.angular_momentum_report())
    {
        info!(
            energy_deviation = energy.relative_deviation,
            energy_drift = drift.energy_drift(),
            angular_momentum_deviation = momentum.relative_deviation,
            perihelia = drift.perihelia.len(),
            "Drift"
        );
    }
    if let Some(perihelia) = drift.perihelion_report() {
        info!(
            min_au = perihelia.minimum * METERS_TO_AU,
            max_au = perihelia.maximum * METERS_TO_AU,
            relative_deviation = perihelia.relative_deviation,
            "Perihelion distance"
        );
    }

    if let Some(path) = &cli.trajectory_out {
        trajectory.write_table(BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), rows = trajectory.len(), "Wrote trajectory");
    }
    if let Some(path) = &cli.drift_out {
        drift.write_table(BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), rows = drift.len(), "Wrote drift series");
    }
    if let Some(path) = &cli.perihelia_out {
        drift.write_perihelia(BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), rows = drift.perihelia.len(), "Wrote perihelia");
    }

    Ok(())
}
