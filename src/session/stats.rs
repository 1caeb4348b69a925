//! Window statistics, recomputed on every call

use crate::classifier::{classify_amplitude, DerivedState};

/// Per-state sample counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub relaxed: u64,
    pub engaged: u64,
    pub seizure: u64,
}

impl StateCounts {
    pub fn get(&self, state: DerivedState) -> u64 {
        match state {
            DerivedState::Relaxed => self.relaxed,
            DerivedState::Engaged => self.engaged,
            DerivedState::Seizure => self.seizure,
        }
    }

    fn record(&mut self, state: DerivedState) {
        match state {
            DerivedState::Relaxed => self.relaxed += 1,
            DerivedState::Engaged => self.engaged += 1,
            DerivedState::Seizure => self.seizure += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.relaxed + self.engaged + self.seizure
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
    pub states: StateCounts,
}

/// Compute statistics over window values. Empty input yields all zeros.
pub fn compute(values: &[f64]) -> WindowStats {
    if values.is_empty() {
        return WindowStats::default();
    }

    let mut states = StateCounts::default();
    for &v in values {
        states.record(classify_amplitude(v));
    }

    WindowStats {
        mean: values.iter().sum::<f64>() / values.len() as f64,
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        count: values.len(),
        states,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_state_window() {
        let stats = compute(&[10.0, 50.0, 90.0]);
        assert_eq!(stats.mean, 50.0);
        assert_eq!(stats.max, 90.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.count, 3);
        assert_eq!(
            stats.states,
            StateCounts {
                relaxed: 1,
                engaged: 1,
                seizure: 1
            }
        );
    }

    #[test]
    fn test_empty_window_is_zeroed() {
        let stats = compute(&[]);
        assert_eq!(stats, WindowStats::default());
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.min, 0.0);
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let values = [12.3, 47.9, 60.0, 61.2, 0.1, 33.33];
        let a = compute(&values);
        let b = compute(&values);
        assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        assert_eq!(a.max.to_bits(), b.max.to_bits());
        assert_eq!(a.min.to_bits(), b.min.to_bits());
        assert_eq!(a.states, b.states);
        assert_eq!(a.states.total(), values.len() as u64);
    }
}
