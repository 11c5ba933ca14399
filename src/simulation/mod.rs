pub mod driver;
pub mod driver_tests;

pub use driver::SimulationDriver;

use crate::dispatcher::Dispatcher;
use crate::shared::ElevatorSnapshot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("tick {tick} failed: {reason}")]
    TickFailed { tick: u64, reason: String },
}

pub type SimResult<T> = Result<T, SimError>;

/// Anything the driver can advance on a timer.
pub trait Simulation: Send + Sync + 'static {
    fn tick(&self);

    fn generate_random_request(&self, max_floor: i32);

    fn snapshot(&self) -> Vec<ElevatorSnapshot>;

    fn pending_count(&self) -> usize;
}

impl Simulation for Dispatcher {
    fn tick(&self) {
        Dispatcher::tick(self);
    }

    fn generate_random_request(&self, max_floor: i32) {
        Dispatcher::generate_random_request(self, max_floor);
    }

    fn snapshot(&self) -> Vec<ElevatorSnapshot> {
        self.get_elevators()
    }

    fn pending_count(&self) -> usize {
        Dispatcher::pending_count(self)
    }
}
