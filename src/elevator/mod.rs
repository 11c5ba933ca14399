pub mod destination_queue;
pub mod elevator;

pub use destination_queue::DestinationQueue;
pub use elevator::Elevator;
