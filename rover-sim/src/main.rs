use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use rover_core::tuning::VehicleTuning;
use rover_core::Settings;
use rover_sim::game::SimServer;

/// Headless arcade vehicle simulation
#[derive(Parser)]
#[command(version, about = "Drives arcade vehicles around a test course without a renderer")]
struct Cli {
    /// Simulation settings (YAML). Missing files fall back to defaults.
    #[arg(long, value_name = "PATH", default_value = "config.yaml")]
    config: PathBuf,

    /// Vehicle tuning (YAML); overrides the path named in the settings.
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// Physics ticks to run before exiting.
    #[arg(long)]
    ticks: Option<u64>,

    /// How many vehicles to park in the garage.
    #[arg(long)]
    vehicles: Option<usize>,

    /// Sleep between frames so the run takes wall-clock time.
    #[arg(long)]
    realtime: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut settings = match Settings::load(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            error!("could not load settings from {}: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };
    if let Some(ticks) = cli.ticks {
        settings.sim_ticks = ticks;
    }
    if let Some(vehicles) = cli.vehicles {
        settings.vehicle_amount = vehicles;
    }
    settings.realtime |= cli.realtime;

    let tuning_path = cli
        .tuning
        .unwrap_or_else(|| PathBuf::from(&settings.tuning_path));
    let tuning = match VehicleTuning::load(&tuning_path) {
        Ok(tuning) => tuning,
        Err(e) => {
            error!("could not load tuning from {}: {}", tuning_path.display(), e);
            std::process::exit(1);
        }
    };

    let ticks = settings.sim_ticks;
    info!("running {} ticks", ticks);
    SimServer::new(settings, tuning).run(ticks);
}
