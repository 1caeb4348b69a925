//! Offline sample source
//!
//! Produces readings shaped like the simulation service's: a mean amplitude
//! rounded to two decimals plus the matching feedback wording. Useful for
//! running the dashboard without a backend.

use {
    super::source::{FetchError, SampleSource},
    crate::{classifier::classify_amplitude, sample::Reading},
    async_trait::async_trait,
    rand::Rng,
};

/// Probability that a reading is a high-amplitude spike
const SPIKE_PROBABILITY: f64 = 0.08;

pub struct SimulatedSource {
    baseline: f64,
    spread: f64,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self {
            baseline: 38.0,
            spread: 14.0,
        }
    }
}

impl SimulatedSource {
    pub fn new(baseline: f64, spread: f64) -> Self {
        Self {
            baseline,
            spread: spread.abs(),
        }
    }

    fn next_amplitude(&self) -> f64 {
        let mut rng = rand::thread_rng();
        let raw = if rng.gen_bool(SPIKE_PROBABILITY) {
            rng.gen_range(61.0..95.0)
        } else {
            self.baseline + rng.gen_range(-self.spread..=self.spread)
        };
        (raw.max(0.0) * 100.0).round() / 100.0
    }
}

#[async_trait]
impl SampleSource for SimulatedSource {
    async fn fetch(&self) -> Result<Reading, FetchError> {
        let amplitude = self.next_amplitude();
        Ok(Reading {
            amplitude,
            feedback: classify_amplitude(amplitude).feedback_text().to_string(),
        })
    }

    fn source_type(&self) -> &'static str {
        "Simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_label;

    #[tokio::test]
    async fn test_simulated_readings_are_self_consistent() {
        let source = SimulatedSource::default();
        for _ in 0..200 {
            let reading = source.fetch().await.unwrap();
            assert!(reading.amplitude >= 0.0);
            assert_eq!(
                classify_label(&reading.feedback),
                classify_amplitude(reading.amplitude)
            );
            let scaled = reading.amplitude * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }
}
