pub mod macros;
pub mod rng;
pub mod structs;

pub use rng::SimRng;
pub use structs::Direction;
pub use structs::ElevatorSnapshot;
pub use structs::FloorRequest;
