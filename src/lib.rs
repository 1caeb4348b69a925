//! # eegflow
//!
//! Terminal dashboard for a polled EEG simulation endpoint.
//!
//! The controller polls `GET {base_url}/simulate_eeg` once per interval and
//! fans every accepted reading out to three stores held by the session:
//! a 30-sample display window, a 10-entry recent-results log and an unbounded
//! export log that serializes to CSV. Window statistics and state counts are
//! recomputed on demand; the TUI rebuilds its charts whenever they change.
//!
//! ## Module Organization
//!
//! - `classifier` - amplitude/label → Relaxed, Engaged, Seizure
//! - `sample` - wire reading and the immutable `Sample`
//! - `session` - window, results, export and stats behind one lock
//! - `poller` - sample sources and the start/stop controller
//! - `ui` - ratatui layout, chart renderers, event loop
//! - `headless` - log-only runner

#[cfg(test)]
mod tests;

pub mod classifier;
pub mod config;
pub mod headless;
pub mod poller;
pub mod sample;
pub mod session;
pub mod ui;

pub use classifier::{classify, classify_amplitude, classify_label, DerivedState};
pub use config::Config;
pub use poller::{Controller, FetchError, HttpSource, SampleSource, SimulatedSource};
pub use sample::{Reading, Sample};
pub use session::{Phase, Session};
