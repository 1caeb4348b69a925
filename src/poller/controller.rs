//! Polling controller
//!
//! Owns the Idle/Running state machine and is the only producer feeding the
//! session. Each tick dispatches one request on its own task, so requests may
//! overlap and complete out of order; the session's ticket check decides what
//! gets applied.

use {
    super::source::SampleSource,
    crate::session::{ApplyOutcome, Phase, Session, Ticket},
    chrono::Utc,
    std::sync::{Arc, Mutex, MutexGuard},
    tokio::{
        sync::RwLock,
        task::JoinHandle,
        time::{interval_at, Duration, Instant, MissedTickBehavior},
    },
};

#[derive(Clone)]
pub struct Controller {
    source: Arc<dyn SampleSource>,
    session: Arc<RwLock<Session>>,
    period: Duration,
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
    fetches: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl Controller {
    /// Controller with a fresh, empty session
    pub fn new(source: Arc<dyn SampleSource>, period: Duration) -> Self {
        Self::with_session(source, Arc::new(RwLock::new(Session::new())), period)
    }

    pub fn with_session(
        source: Arc<dyn SampleSource>,
        session: Arc<RwLock<Session>>,
        period: Duration,
    ) -> Self {
        Self {
            source,
            session,
            period,
            timer: Arc::new(Mutex::new(None)),
            fetches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn session(&self) -> Arc<RwLock<Session>> {
        self.session.clone()
    }

    pub async fn phase(&self) -> Phase {
        self.session.read().await.phase()
    }

    /// Idle → Running: one immediate fetch, then a fetch every period.
    ///
    /// No-op while already running, so at most one timer is ever armed.
    pub async fn start(&self) {
        let generation = {
            let mut session = self.session.write().await;
            if session.is_running() {
                log::debug!("Start ignored: already running");
                return;
            }
            session.begin_run()
        };

        log::info!(
            "▶️  Polling {} source every {}ms (run #{})",
            self.source.source_type(),
            self.period.as_millis(),
            generation
        );

        self.dispatch(generation).await;

        let ticker = self.clone();
        let handle = tokio::spawn(async move {
            ticker.run_timer(generation).await;
        });

        // A stop or restart may have raced in; only the current run keeps a timer
        let session = self.session.read().await;
        if session.is_running() && session.generation() == generation {
            if let Some(previous) = self.lock_timer().replace(handle) {
                previous.abort();
            }
        } else {
            handle.abort();
        }
    }

    /// Running → Idle. In-flight requests finish but are discarded.
    pub async fn stop(&self) {
        {
            let mut session = self.session.write().await;
            if !session.is_running() {
                return;
            }
            session.end_run();
            self.cancel_timer();
        }

        log::info!("⏹️  Polling stopped");
    }

    /// Stop when running, start when idle
    pub async fn toggle(&self) {
        let running = self.session.read().await.is_running();
        if running {
            self.stop().await;
        } else {
            self.start().await;
        }
    }

    /// Dispatch one request now. Returns `false` when the controller is idle.
    pub async fn tick(&self) -> bool {
        let generation = self.session.read().await.generation();
        self.dispatch(generation).await
    }

    /// Wait for every in-flight request to complete
    pub async fn settle(&self) {
        loop {
            let pending = std::mem::take(&mut *self.lock_fetches());
            if pending.is_empty() {
                break;
            }

            for handle in pending {
                if let Err(e) = handle.await {
                    if !e.is_cancelled() {
                        log::warn!("Fetch task ended abnormally: {}", e);
                    }
                }
            }
        }
    }

    async fn run_timer(&self, generation: u64) {
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            timer.tick().await;
            if !self.dispatch(generation).await {
                break;
            }
        }

        log::debug!("Timer for run #{} exited", generation);
    }

    async fn dispatch(&self, generation: u64) -> bool {
        let ticket = self.session.write().await.issue_ticket(generation);
        let Some(ticket) = ticket else {
            return false;
        };

        log::debug!("📤 Dispatching request #{}", ticket.sequence);

        let this = self.clone();
        let handle = tokio::spawn(async move {
            this.complete(ticket).await;
        });

        let mut fetches = self.lock_fetches();
        fetches.retain(|h| !h.is_finished());
        fetches.push(handle);
        true
    }

    async fn complete(&self, ticket: Ticket) {
        let result = self.source.fetch().await;
        let captured_at = Utc::now();

        let mut session = self.session.write().await;
        match result {
            Ok(reading) => match session.apply(ticket, reading, captured_at) {
                ApplyOutcome::Applied => {
                    log::debug!("📥 Applied request #{}", ticket.sequence);
                }
                ApplyOutcome::Superseded => {
                    log::debug!("Discarded request #{}: superseded", ticket.sequence);
                }
                ApplyOutcome::Inactive => {
                    log::debug!("Discarded request #{}: run no longer active", ticket.sequence);
                }
            },
            Err(e) => {
                log::warn!("❌ Request #{} failed: {}", ticket.sequence, e);
                if session.fail(ticket, e.operator_message()) {
                    // Session lock is still held: no new run can begin before the cancel
                    self.cancel_timer();
                    log::warn!("⏹️  Polling stopped after fetch failure");
                }
            }
        }
    }

    fn cancel_timer(&self) {
        if let Some(handle) = self.lock_timer().take() {
            handle.abort();
        }
    }

    fn lock_timer(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_fetches(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.fetches.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
