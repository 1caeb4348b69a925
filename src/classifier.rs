//! Physiological state classification
//!
//! The amplitude threshold is the canonical policy. The free-text label path
//! exists only for readings where no amplitude is at hand; it is kept in step
//! with the thresholds through `DerivedState::feedback_text`, which produces
//! the exact wording the label matcher recognises.

use crate::sample::Sample;

/// Upper bound (inclusive) of the relaxed band
pub const RELAXED_MAX: f64 = 40.0;

/// Upper bound (inclusive) of the engaged band
pub const ENGAGED_MAX: f64 = 60.0;

/// State derived from a sample; computed on demand, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedState {
    Relaxed,
    Engaged,
    Seizure,
}

impl DerivedState {
    pub fn all() -> [DerivedState; 3] {
        [DerivedState::Relaxed, DerivedState::Engaged, DerivedState::Seizure]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DerivedState::Relaxed => "Relaxed",
            DerivedState::Engaged => "Engaged",
            DerivedState::Seizure => "Seizure",
        }
    }

    /// Bucket caption used by the distribution chart
    pub fn range_caption(&self) -> &'static str {
        match self {
            DerivedState::Relaxed => "Relaxed (≤40)",
            DerivedState::Engaged => "Engaged (41-60)",
            DerivedState::Seizure => "Seizure (>60)",
        }
    }

    /// Feedback wording the simulation service sends for this state.
    ///
    /// `classify_label(state.feedback_text()) == state` holds for every state.
    pub fn feedback_text(&self) -> &'static str {
        match self {
            DerivedState::Relaxed => "Patient is relaxed(Theta wave dominant)",
            DerivedState::Engaged => "Patient is engaged(Aplha wave dominant)",
            DerivedState::Seizure => {
                "Seizure detected(When a immedidate spike is there more than 60 amplitude)"
            }
        }
    }
}

/// Classify a raw amplitude: ≤40 relaxed, (40, 60] engaged, >60 seizure
pub fn classify_amplitude(amplitude: f64) -> DerivedState {
    if amplitude > ENGAGED_MAX {
        DerivedState::Seizure
    } else if amplitude > RELAXED_MAX {
        DerivedState::Engaged
    } else {
        DerivedState::Relaxed
    }
}

/// Classify a free-text feedback label.
///
/// Matching is case-sensitive on purpose: the service capitalises "Seizure"
/// and writes "engaged" in lower case.
pub fn classify_label(label: &str) -> DerivedState {
    if label.contains("Seizure") {
        DerivedState::Seizure
    } else if label.contains("engaged") {
        DerivedState::Engaged
    } else {
        DerivedState::Relaxed
    }
}

/// Canonical classification of a sample (by amplitude)
pub fn classify(sample: &Sample) -> DerivedState {
    classify_amplitude(sample.amplitude)
}

/// Reconcile an incoming label with its amplitude at ingestion time.
///
/// Blank labels are replaced by the canonical wording. A label that names a
/// different state than the amplitude is kept verbatim for display but logged,
/// since every consumer classifies by amplitude.
pub fn reconcile_label(amplitude: f64, label: &str) -> String {
    let state = classify_amplitude(amplitude);
    let trimmed = label.trim();

    if trimmed.is_empty() {
        return state.feedback_text().to_string();
    }

    let from_label = classify_label(trimmed);
    if from_label != state {
        log::debug!(
            "Feedback label disagrees with amplitude {:.2}: label={} amplitude={}",
            amplitude,
            from_label.label(),
            state.label()
        );
    }

    label.to_string()
}
