/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, info};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::SimulationConfig;
use crate::shared::{ElevatorSnapshot, SimRng};
use crate::simulation::{SimError, SimResult, Simulation};

/**
 * Drives a simulation on a fixed interval.
 *
 * Every tick may inject one random request, then advances the simulation and
 * publishes a snapshot of the fleet. Between ticks the driver waits on the
 * terminate channel, so a stop request (or dropping the sender) ends the wait
 * immediately. A tick that has started always runs to completion.
 *
 * # Fields
 * - `simulation`:                  The model being advanced.
 * - `rng`:                         Decides whether a tick injects a random request.
 * - `max_floor`:                   Top floor handed to the request generator.
 * - `step_interval`:               Delay between two ticks.
 * - `random_request_probability`:  Chance of injecting a request on each tick.
 * - `max_ticks`:                   Stop by itself after this many ticks, if set.
 * - `snapshot_tx`:                 Receives the fleet state after every tick.
 * - `terminate_rx`:                Cancels the loop.
 */
pub struct SimulationDriver<S: Simulation> {
    simulation: Arc<S>,
    rng: SimRng,
    max_floor: i32,
    step_interval: Duration,
    random_request_probability: f64,
    max_ticks: Option<u64>,

    snapshot_tx: cbc::Sender<Vec<ElevatorSnapshot>>,
    terminate_rx: cbc::Receiver<()>,
}

impl<S: Simulation> SimulationDriver<S> {
    pub fn new(
        config: &SimulationConfig,
        max_floor: i32,
        simulation: Arc<S>,
        rng: SimRng,
        snapshot_tx: cbc::Sender<Vec<ElevatorSnapshot>>,
        terminate_rx: cbc::Receiver<()>,
    ) -> SimulationDriver<S> {
        SimulationDriver {
            simulation,
            rng,
            max_floor,
            step_interval: Duration::from_millis(config.step_interval_ms),
            random_request_probability: config.random_request_probability,
            max_ticks: None,
            snapshot_tx,
            terminate_rx,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> SimulationDriver<S> {
        self.max_ticks = max_ticks;
        self
    }

    /// Runs until cancelled or `max_ticks` is reached, returns the number of ticks run.
    pub fn run(mut self) -> u64 {
        info!("Simulation driver started");
        let mut ticks: u64 = 0;

        loop {
            if let Err(e) = self.run_tick(ticks) {
                error!("Error occurred in simulation loop: {}", e);
            }
            ticks += 1;
            debug!(
                "Tick {} done, {} requests pending",
                ticks,
                self.simulation.pending_count()
            );

            if self.snapshot_tx.send(self.simulation.snapshot()).is_err() {
                debug!("No snapshot receiver, dropping fleet state");
            }

            if self.max_ticks.map_or(false, |max| ticks >= max) {
                break;
            }

            cbc::select! {
                recv(self.terminate_rx) -> _ => break,
                default(self.step_interval) => {}
            }
        }

        info!("Simulation driver stopped after {} ticks", ticks);
        ticks
    }

    fn run_tick(&mut self, tick: u64) -> SimResult<()> {
        let inject = self.rng.gen_bool(self.random_request_probability);
        let simulation = &self.simulation;
        let max_floor = self.max_floor;

        panic::catch_unwind(AssertUnwindSafe(|| {
            if inject {
                simulation.generate_random_request(max_floor);
            }
            simulation.tick();
        }))
        .map_err(|payload| SimError::TickFailed {
            tick,
            reason: panic_message(payload.as_ref()),
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
