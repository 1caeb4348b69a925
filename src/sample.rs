use {
    crate::classifier::{self, DerivedState},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Body of `GET /simulate_eeg`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub amplitude: f64,
    pub feedback: String,
}

/// One accepted sensor reading. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub sequence_index: u64,
    pub amplitude: f64,
    pub feedback_label: String,
    pub captured_at: DateTime<Utc>,
}

impl Sample {
    /// Build a sample from a decoded reading, reconciling its label
    pub fn from_reading(sequence_index: u64, reading: Reading, captured_at: DateTime<Utc>) -> Self {
        let feedback_label = classifier::reconcile_label(reading.amplitude, &reading.feedback);
        Self {
            sequence_index,
            amplitude: reading.amplitude,
            feedback_label,
            captured_at,
        }
    }

    pub fn state(&self) -> DerivedState {
        classifier::classify(self)
    }
}
