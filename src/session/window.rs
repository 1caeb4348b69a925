//! Bounded display window of recent samples (oldest-first)

use crate::sample::Sample;
use std::collections::VecDeque;

/// Number of samples kept for the live chart
pub const WINDOW_CAPACITY: usize = 30;

#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for TimeSeriesStore {
    fn default() -> Self {
        Self::new(WINDOW_CAPACITY)
    }
}

impl TimeSeriesStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push to the back, evicting from the front while over capacity
    pub fn append(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// `(label, amplitude)` pairs, oldest first
    pub fn current_window(&self) -> Vec<(u64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.sequence_index, s.amplitude))
            .collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.amplitude).collect()
    }

    pub fn labels(&self) -> Vec<u64> {
        self.samples.iter().map(|s| s.sequence_index).collect()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
