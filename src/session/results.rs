//! Recent results, most-recent-first

use crate::sample::Sample;
use std::collections::VecDeque;

pub const RESULTS_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct ResultsLog {
    entries: VecDeque<Sample>,
    capacity: usize,
}

impl Default for ResultsLog {
    fn default() -> Self {
        Self::new(RESULTS_CAPACITY)
    }
}

impl ResultsLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the front and drop the oldest from the tail
    pub fn append(&mut self, sample: Sample) {
        self.entries.push_front(sample);
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> impl Iterator<Item = &Sample> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
