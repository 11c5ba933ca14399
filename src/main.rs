/* 3rd party libraries */
use clap::{Arg, ArgMatches, Command};
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use std::thread::Builder;

/* Custom libraries */
use console::Console;
use dispatcher::Dispatcher;
use shared::{ElevatorSnapshot, SimRng};
use simulation::SimulationDriver;

/* Modules */
mod config;
mod console;
mod dispatcher;
mod elevator;
mod shared;
mod simulation;

fn cli() -> Command<'static> {
    Command::new("elevator-sim")
        .about("Simulates a bank of elevators serving floor requests")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for a reproducible run"),
        )
        .arg(
            Arg::new("ticks")
                .long("ticks")
                .takes_value(true)
                .help("Stop after this many ticks"),
        )
        .arg(
            Arg::new("interval-ms")
                .long("interval-ms")
                .takes_value(true)
                .help("Milliseconds between two ticks, overrides the configuration"),
        )
}

fn parse_arg<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: Display,
{
    matches
        .value_of(name)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| format!("invalid value '{}' for --{}: {}", value, name, e))
        })
        .transpose()
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load the configuration
    let matches = cli().get_matches();
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut config = unwrap_or_exit!(config::load_config(config_path));
    if let Some(interval) = unwrap_or_exit!(parse_arg::<u64>(&matches, "interval-ms")) {
        config.simulation.step_interval_ms = interval;
    }
    let seed = unwrap_or_exit!(parse_arg::<u64>(&matches, "seed"));
    let max_ticks = unwrap_or_exit!(parse_arg::<u64>(&matches, "ticks"));

    let mut rng = match seed {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_entropy(),
    };
    info!(
        "Starting {} elevators in a {} floor building",
        config.building.elevator_count, config.building.max_floor
    );

    // Initialize channels
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
    let (snapshot_tx, snapshot_rx) = cbc::unbounded::<Vec<ElevatorSnapshot>>();

    let dispatcher = Arc::new(Dispatcher::new(config.building.elevator_count, rng.child(1)));

    // Start the simulation driver
    let driver = SimulationDriver::new(
        &config.simulation,
        config.building.max_floor,
        dispatcher.clone(),
        rng.child(2),
        snapshot_tx,
        terminate_rx,
    )
    .with_max_ticks(max_ticks);

    let driver_thread = unwrap_or_exit!(Builder::new()
        .name("simulation_driver".into())
        .spawn(move || driver.run()));

    // Start the console, end of input leaves the simulation running
    let console = Console::new(dispatcher, config.building.max_floor, terminate_tx.clone());
    unwrap_or_exit!(Builder::new()
        .name("console".into())
        .spawn(move || console.run(std::io::stdin().lock())));

    // Report fleet state until the driver stops
    for snapshot in snapshot_rx.iter() {
        match serde_json::to_string(&snapshot) {
            Ok(fleet) => info!("Fleet: {}", fleet),
            Err(e) => warn!("Failed to serialize fleet state: {}", e),
        }
    }

    match driver_thread.join() {
        Ok(ticks) => info!("Simulation finished after {} ticks", ticks),
        Err(_) => error!("Simulation driver thread panicked"),
    }
    drop(terminate_tx);
}
