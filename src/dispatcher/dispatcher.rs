/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{info, warn};
use rayon::prelude::*;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::Elevator;
use crate::shared::{Direction, ElevatorSnapshot, FloorRequest, SimRng};

/***************************************/
/*             Constants               */
/***************************************/
const BUSY_PENALTY: i64 = 10;

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Matches floor requests to elevators and moves the fleet one tick at a time.
 *
 * Lock order is `pending` -> `rng` -> `elevators`. `tick` holds `pending` for
 * its whole duration, so submissions wait for an in-flight tick and no request
 * is assigned twice or lost.
 *
 * # Fields
 * - `pending`:     Requests not yet handed to an elevator.
 * - `rng`:         Injected random source for tie-breaks and generated requests.
 * - `elevators`:   The fleet, fixed at construction and ordered by id.
 */
pub struct Dispatcher {
    pending: Mutex<Vec<FloorRequest>>,
    rng: Mutex<SimRng>,
    elevators: RwLock<Vec<Elevator>>,
}

impl Dispatcher {
    pub fn new(elevator_count: usize, rng: SimRng) -> Dispatcher {
        let elevators = (1..=elevator_count as u32).map(Elevator::new).collect();

        Dispatcher {
            pending: Mutex::new(Vec::new()),
            rng: Mutex::new(rng),
            elevators: RwLock::new(elevators),
        }
    }

    pub fn get_elevators(&self) -> Vec<ElevatorSnapshot> {
        self.read_elevators().iter().map(Elevator::snapshot).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.lock_pending().len()
    }

    pub fn submit_request(&self, request: FloorRequest) {
        let mut pending = self.lock_pending();
        pending.push(request);
        info!(
            "User request received: {} at floor {}",
            request.direction, request.floor
        );
    }

    /**
     * Queues a request for a uniformly random floor in `[1, max_floor]`.
     *
     * The top floor always calls down and floor 1 always calls up; anywhere
     * else the direction is a coin flip.
     */
    pub fn generate_random_request(&self, max_floor: i32) -> FloorRequest {
        let max_floor = max_floor.max(1);
        let mut pending = self.lock_pending();

        let request = {
            let mut rng = self.lock_rng();
            let floor = rng.gen_range(1..=max_floor);
            let direction = if floor == max_floor {
                Direction::Down
            } else if floor == 1 {
                Direction::Up
            } else if rng.gen_bool(0.5) {
                Direction::Up
            } else {
                Direction::Down
            };
            FloorRequest::new(floor, direction)
        };

        pending.push(request);
        info!(
            "Random request generated: {} at floor {}",
            request.direction, request.floor
        );
        request
    }

    /**
     * Advances the simulation by one step.
     *
     * First every pending request is assigned to its best elevator, then all
     * elevators step in parallel. The movement pass only starts once the
     * assignment pass is done, and each elevator's step sees nothing but its
     * own state.
     */
    pub fn tick(&self) {
        let mut pending = self.lock_pending();
        let mut rng = self.lock_rng();
        let mut elevators = self.write_elevators();

        assign_requests(&mut pending, &mut elevators, &mut rng);
        drop(rng);

        elevators.as_mut_slice().par_iter_mut().for_each(Elevator::step);
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<FloorRequest>> {
        self.pending.lock().unwrap_or_else(|poisoned| {
            warn!("Pending request lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lock_rng(&self) -> MutexGuard<'_, SimRng> {
        self.rng.lock().unwrap_or_else(|poisoned| {
            warn!("Random source lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn read_elevators(&self) -> RwLockReadGuard<'_, Vec<Elevator>> {
        self.elevators.read().unwrap_or_else(|poisoned| {
            warn!("Elevator lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_elevators(&self) -> RwLockWriteGuard<'_, Vec<Elevator>> {
        self.elevators.write().unwrap_or_else(|poisoned| {
            warn!("Elevator lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/***************************************/
/*          Assignment scoring         */
/***************************************/

// Hands every pending request to its best elevator, leaves the rest pending.
// A request leaves the list only once an elevator has taken it.
pub(crate) fn assign_requests(
    pending: &mut Vec<FloorRequest>,
    elevators: &mut [Elevator],
    rng: &mut SimRng,
) {
    let mut next = 0;
    while next < pending.len() {
        let request = pending[next];
        match choose_elevator(elevators, &request, rng) {
            Some(index) => {
                let elevator = &mut elevators[index];
                elevator.add_destination(request.floor);
                pending.remove(next);
                info!(
                    "Assigned floor {} to elevator {}",
                    request.floor,
                    elevator.id()
                );
            }
            // No elevators to take it, try again next tick
            None => next += 1,
        }
    }
}

// Lower is better: busy elevators pay a flat penalty, then distance, then workload
pub fn score(elevator: &Elevator, request: &FloorRequest) -> i64 {
    let busy = if elevator.is_idle() { 0 } else { BUSY_PENALTY };
    let distance = (elevator.current_floor() as i64 - request.floor as i64).abs();
    busy + distance + elevator.destination_count() as i64
}

// Index of a minimum-score elevator, ties broken uniformly at random
fn choose_elevator(
    elevators: &[Elevator],
    request: &FloorRequest,
    rng: &mut SimRng,
) -> Option<usize> {
    let scores: Vec<i64> = elevators.iter().map(|e| score(e, request)).collect();
    let best = *scores.iter().min()?;

    let candidates: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == best)
        .map(|(index, _)| index)
        .collect();

    rng.choose(&candidates).copied()
}
