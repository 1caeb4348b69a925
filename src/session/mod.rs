//! In-memory session state shared by the controller and the UI
//!
//! `Session` is the single exclusive section for store mutation: a sample is
//! fanned out to the window, the results log and the export log under one
//! `&mut self` borrow, which the controller only obtains through the write half
//! of a `tokio::sync::RwLock`.
//!
//! ## Request bookkeeping
//!
//! Every dispatched request receives a [`Ticket`] carrying a monotonically
//! increasing sequence number and the generation of the run that issued it.
//! A completed request is applied only when:
//! - the session is still `Running`,
//! - its generation is the current one (no leakage across Stop/Start), and
//! - its sequence number is greater than the last applied one.

pub mod export;
pub mod results;
pub mod stats;
pub mod window;

use {
    crate::sample::{Reading, Sample},
    chrono::{DateTime, Utc},
    export::ExportAccumulator,
    results::ResultsLog,
    stats::WindowStats,
    window::TimeSeriesStore,
};

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// Tag attached to a request at dispatch time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub sequence: u64,
    pub generation: u64,
}

/// What happened to a completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A request with an equal or higher sequence number was already applied
    Superseded,
    /// The session was stopped (or restarted) after dispatch
    Inactive,
}

pub struct Session {
    window: TimeSeriesStore,
    results: ResultsLog,
    export: ExportAccumulator,
    phase: Phase,
    generation: u64,
    next_sequence: u64,
    last_applied: Option<u64>,
    in_flight: usize,
    last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_export(ExportAccumulator::new())
    }

    pub fn with_export(export: ExportAccumulator) -> Self {
        Self {
            window: TimeSeriesStore::default(),
            results: ResultsLog::default(),
            export,
            phase: Phase::Idle,
            generation: 0,
            next_sequence: 0,
            last_applied: None,
            in_flight: 0,
            last_error: None,
        }
    }

    /// Enter `Running` under a fresh generation and clear any reported error
    pub fn begin_run(&mut self) -> u64 {
        self.phase = Phase::Running;
        self.generation += 1;
        self.last_error = None;
        self.generation
    }

    pub fn end_run(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Allocate a ticket for a new request, if `generation` is still running
    pub fn issue_ticket(&mut self, generation: u64) -> Option<Ticket> {
        if !self.accepts(generation) {
            return None;
        }

        let ticket = Ticket {
            sequence: self.next_sequence,
            generation,
        };
        self.next_sequence += 1;
        self.in_flight += 1;
        Some(ticket)
    }

    /// Apply a successful response
    pub fn apply(
        &mut self,
        ticket: Ticket,
        reading: Reading,
        captured_at: DateTime<Utc>,
    ) -> ApplyOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        if !self.accepts(ticket.generation) {
            return ApplyOutcome::Inactive;
        }
        if self.is_superseded(ticket.sequence) {
            return ApplyOutcome::Superseded;
        }

        self.last_applied = Some(ticket.sequence);
        self.record(Sample::from_reading(ticket.sequence, reading, captured_at));
        ApplyOutcome::Applied
    }

    /// Handle a failed request. Returns `true` when the failure stopped the run.
    pub fn fail(&mut self, ticket: Ticket, message: &str) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        // Any failure in the current run stops it, even behind a newer success
        if !self.accepts(ticket.generation) {
            return false;
        }

        self.phase = Phase::Idle;
        self.last_error = Some(message.to_string());
        true
    }

    /// Fan a sample out to every store
    pub fn record(&mut self, sample: Sample) {
        self.export.append(&sample);
        self.results.append(sample.clone());
        self.window.append(sample);
    }

    pub fn stats(&self) -> WindowStats {
        stats::compute(&self.window.values())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn window(&self) -> &TimeSeriesStore {
        &self.window
    }

    pub fn results(&self) -> &ResultsLog {
        &self.results
    }

    pub fn export(&self) -> &ExportAccumulator {
        &self.export
    }

    fn accepts(&self, generation: u64) -> bool {
        self.phase == Phase::Running && self.generation == generation
    }

    fn is_superseded(&self, sequence: u64) -> bool {
        self.last_applied.is_some_and(|last| sequence <= last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(amplitude: f64) -> Reading {
        Reading {
            amplitude,
            feedback: String::new(),
        }
    }

    #[test]
    fn test_out_of_order_response_is_discarded() {
        let mut session = Session::new();
        let gen = session.begin_run();
        let first = session.issue_ticket(gen).unwrap();
        let second = session.issue_ticket(gen).unwrap();
        assert_eq!(session.in_flight(), 2);

        assert_eq!(session.apply(second, reading(50.0), Utc::now()), ApplyOutcome::Applied);
        assert_eq!(session.apply(first, reading(90.0), Utc::now()), ApplyOutcome::Superseded);

        assert_eq!(session.window().values(), vec![50.0]);
        assert_eq!(session.export().len(), 1);
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn test_response_after_stop_is_discarded() {
        let mut session = Session::new();
        let gen = session.begin_run();
        let ticket = session.issue_ticket(gen).unwrap();
        session.end_run();

        assert_eq!(session.apply(ticket, reading(30.0), Utc::now()), ApplyOutcome::Inactive);
        assert!(session.window().is_empty());
        assert!(session.issue_ticket(gen).is_none());
    }

    #[test]
    fn test_previous_run_cannot_leak_into_new_run() {
        let mut session = Session::new();
        let old_gen = session.begin_run();
        let old_ticket = session.issue_ticket(old_gen).unwrap();
        session.end_run();

        let new_gen = session.begin_run();
        assert_ne!(old_gen, new_gen);
        assert_eq!(session.apply(old_ticket, reading(30.0), Utc::now()), ApplyOutcome::Inactive);
        assert!(!session.fail(old_ticket, "boom"));
        assert!(session.is_running());
    }

    #[test]
    fn test_failure_stops_run_and_keeps_data() {
        let mut session = Session::new();
        let gen = session.begin_run();
        let ok = session.issue_ticket(gen).unwrap();
        session.apply(ok, reading(20.0), Utc::now());

        let bad = session.issue_ticket(gen).unwrap();
        assert!(session.fail(bad, "unreachable"));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.last_error(), Some("unreachable"));
        assert_eq!(session.window().len(), 1);

        session.begin_run();
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_older_failure_stops_run_after_newer_success() {
        let mut session = Session::new();
        let gen = session.begin_run();
        let first = session.issue_ticket(gen).unwrap();
        let second = session.issue_ticket(gen).unwrap();

        assert_eq!(session.apply(second, reading(50.0), Utc::now()), ApplyOutcome::Applied);
        assert!(session.fail(first, "timed out"));

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.last_error(), Some("timed out"));
        assert_eq!(session.window().values(), vec![50.0]);
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn test_fan_out_reaches_every_store() {
        let mut session = Session::new();
        let gen = session.begin_run();
        for i in 0..40 {
            let ticket = session.issue_ticket(gen).unwrap();
            session.apply(ticket, reading(i as f64), Utc::now());
        }

        assert_eq!(session.window().len(), 30);
        assert_eq!(session.results().len(), 10);
        assert_eq!(session.export().len(), 40);
        assert_eq!(session.last_applied(), Some(39));
        assert_eq!(session.results().entries().next().map(|s| s.sequence_index), Some(39));
    }
}
