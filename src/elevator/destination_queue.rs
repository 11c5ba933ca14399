use std::collections::VecDeque;

/**
 * FIFO of floors an elevator has been told to visit.
 *
 * A floor appears at most once. Any integer is accepted here; keeping floors
 * inside the building is the job of whoever validates incoming requests.
 */
#[derive(Debug, Clone, Default)]
pub struct DestinationQueue {
    floors: VecDeque<i32>,
}

impl DestinationQueue {
    pub fn new() -> DestinationQueue {
        DestinationQueue {
            floors: VecDeque::new(),
        }
    }

    // Queue depths stay small, so a linear duplicate scan is fine
    pub fn add_destination(&mut self, floor: i32) {
        if !self.floors.contains(&floor) {
            self.floors.push_back(floor);
        }
    }

    /// Head of the queue without removing it, `None` when there is nowhere to go.
    pub fn peek_next(&self) -> Option<i32> {
        self.floors.front().copied()
    }

    pub fn remove_current(&mut self) {
        self.floors.pop_front();
    }

    pub fn is_idle(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn floors(&self) -> Vec<i32> {
        self.floors.iter().copied().collect()
    }
}
