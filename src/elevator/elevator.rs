use crate::elevator::DestinationQueue;
use crate::shared::{Direction, ElevatorSnapshot};
use log::debug;

/**
 * One car in the simulated bank.
 *
 * The elevator moves at most one floor per call to `step`. Its direction is
 * derived from the head of the destination queue and is `Idle` exactly when
 * the queue is empty.
 *
 * # Fields
 * - `id`:              Stable identifier, assigned once by the dispatcher.
 * - `current_floor`:   Floor the car is at. Every elevator starts at floor 1.
 * - `direction`:       Direction of the last movement, `Idle` with no destinations.
 * - `destinations`:    Floors still to visit, served in arrival order.
 */
#[derive(Debug, Clone)]
pub struct Elevator {
    id: u32,
    current_floor: i32,
    direction: Direction,
    destinations: DestinationQueue,
}

impl Elevator {
    pub fn new(id: u32) -> Elevator {
        Elevator {
            id,
            current_floor: 1,
            direction: Direction::Idle,
            destinations: DestinationQueue::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn current_floor(&self) -> i32 {
        self.current_floor
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_idle(&self) -> bool {
        self.destinations.is_idle() && self.direction == Direction::Idle
    }

    // Duplicates are ignored by the queue
    pub fn add_destination(&mut self, floor: i32) {
        self.destinations.add_destination(floor);
    }

    pub fn step(&mut self) {
        let target = match self.destinations.peek_next() {
            Some(target) => target,
            None => {
                self.direction = Direction::Idle;
                return;
            }
        };

        if self.current_floor == target {
            // Arrival takes the whole tick, the car does not move on until the next one
            self.destinations.remove_current();
            debug!("Elevator {} arrived at floor {}", self.id, target);
        } else {
            self.direction = if target > self.current_floor {
                Direction::Up
            } else {
                Direction::Down
            };
            self.current_floor += if self.direction == Direction::Up { 1 } else { -1 };
            debug!(
                "Elevator {} moved {} to floor {}",
                self.id, self.direction, self.current_floor
            );
        }

        if self.destinations.is_idle() {
            self.direction = Direction::Idle;
        }
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id: self.id,
            current_floor: self.current_floor,
            direction: self.direction,
            destination_count: self.destinations.len(),
            destinations: self.destinations.floors(),
        }
    }
}
