/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Idle => write!(f, "Idle"),
        }
    }
}

/**
 * A call for an elevator at `floor`, travelling in `direction`.
 *
 * Requests reaching the dispatcher are already validated: the floor lies inside
 * the building and the direction is `Up` or `Down`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRequest {
    pub floor: i32,
    pub direction: Direction,
}

impl FloorRequest {
    pub fn new(floor: i32, direction: Direction) -> FloorRequest {
        FloorRequest { floor, direction }
    }
}

// Read-only view of one elevator, handed out to callers outside the tick
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorSnapshot {
    pub id: u32,
    #[serde(rename = "currentFloor")]
    pub current_floor: i32,
    pub direction: Direction,
    #[serde(rename = "destinationCount")]
    pub destination_count: usize,
    pub destinations: Vec<i32>,
}
