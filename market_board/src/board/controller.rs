//! Drives the board: probe, first load, then periodic polling.
//!
//! [`PollingController`] owns the watch list and publishes every change as a
//! [`BoardSnapshot`] on a `tokio::sync::watch` channel. The single-step
//! operations ([`initialize`](PollingController::initialize),
//! [`poll_once`](PollingController::poll_once),
//! [`refresh`](PollingController::refresh)) can be driven by hand;
//! [`spawn`](PollingController::spawn) runs them on a timer.

use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use chrono::Utc;
use quote_feed::{DisplayRecord, ProviderError, QuoteProvider};
use rand::{SeedableRng, rngs::StdRng};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::board::state::{BoardSnapshot, BoardState, FETCH_FAILED};

/// Time between two polls unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Polls a [`QuoteProvider`] for a fixed watch list and publishes snapshots.
///
/// Cloning is cheap and every clone feeds the same snapshot channel.
/// Stopping a [`PollingHandle`] only affects the tasks of that `spawn`.
pub struct PollingController<P: QuoteProvider + ?Sized + 'static> {
    provider: Arc<P>,
    symbols: Arc<[String]>,
    interval: Duration,
    snapshot: Arc<watch::Sender<BoardSnapshot>>,
    rng: Arc<Mutex<StdRng>>,
    active: Arc<AtomicBool>,
}

impl<P: QuoteProvider + ?Sized + 'static> Clone for PollingController<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            symbols: Arc::clone(&self.symbols),
            interval: self.interval,
            snapshot: Arc::clone(&self.snapshot),
            rng: Arc::clone(&self.rng),
            active: Arc::clone(&self.active),
        }
    }
}

impl<P: QuoteProvider + ?Sized + 'static> PollingController<P> {
    /// Creates an uninitialized controller for `symbols`, polled in order.
    pub fn new(provider: Arc<P>, symbols: Vec<String>) -> Self {
        let (snapshot, _) = watch::channel(BoardSnapshot::default());
        Self {
            provider,
            symbols: symbols.into(),
            interval: DEFAULT_POLL_INTERVAL,
            snapshot: Arc::new(snapshot),
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Sets the polling period used by [`spawn`](Self::spawn).
    ///
    /// A zero period is ignored and [`DEFAULT_POLL_INTERVAL`] is kept.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if interval.is_zero() {
            warn!(default = ?DEFAULT_POLL_INTERVAL, "zero poll interval ignored");
        } else {
            self.interval = interval;
        }
        self
    }

    /// Polling period used by [`spawn`](Self::spawn).
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Seeds the spread generator so runs are reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.lock().unwrap_or_else(PoisonError::into_inner) = StdRng::seed_from_u64(seed);
        self
    }

    /// The watch list, in display order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// New receiver for snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshot.subscribe()
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BoardState {
        self.snapshot.borrow().state
    }

    /// Probes the vendor and loads the first batch.
    ///
    /// An unreachable vendor puts the board in `Demo` quietly. A reachable
    /// vendor whose first batch fails also lands in `Demo`, with the banner
    /// raised.
    pub async fn initialize(&self) -> BoardState {
        self.publish(BoardSnapshot::begin_connecting);

        if !self.provider.check_connection().await {
            warn!("quote vendor unreachable; showing sample data");
            self.publish(|s| s.enter_demo(None));
            return self.state();
        }

        match self.fetch_records().await {
            Ok(records) => {
                info!(symbols = records.len(), "live market data loaded");
                self.publish(|s| s.apply_live(records, Utc::now()));
            }
            Err(e) => {
                warn!(error = %e, "initial fetch failed; showing sample data");
                self.publish(|s| s.enter_demo(Some(FETCH_FAILED.to_string())));
            }
        }
        self.state()
    }

    /// Fetches one batch and applies it. Does nothing unless the board is live.
    ///
    /// A failure keeps the rows already on screen and raises the banner.
    pub async fn poll_once(&self) {
        if self.state() != BoardState::Live {
            return;
        }

        match self.fetch_records().await {
            Ok(records) => self.publish(|s| {
                // a re-initialization may have moved the board while we waited
                if s.is_live() {
                    s.apply_live(records, Utc::now());
                }
            }),
            Err(e) => {
                warn!(error = %e, "poll failed; keeping last data");
                self.publish(|s| {
                    if s.is_live() {
                        s.apply_poll_failure();
                    }
                });
            }
        }
    }

    /// Manual refresh: polls when live, otherwise starts over.
    pub async fn refresh(&self) {
        if self.state() == BoardState::Live {
            self.poll_once().await;
        } else {
            self.initialize().await;
        }
    }

    /// Runs [`initialize`](Self::initialize) and then polls on every tick.
    ///
    /// Each tick starts its poll as a separate task, so a slow fetch may
    /// overlap the next one; whichever finishes last wins.
    ///
    /// The spawned tasks get their own stop flag: dropping the returned
    /// handle silences them only, and other clones of this controller keep
    /// publishing.
    pub fn spawn(mut self) -> PollingHandle {
        self.active = Arc::new(AtomicBool::new(true));
        let updates = self.subscribe();
        let active = Arc::clone(&self.active);

        let task = tokio::spawn(async move {
            let init = tokio::spawn({
                let controller = self.clone();
                async move { controller.initialize().await }
            });
            // initialize only fails by panicking, which tokio already reports
            let _ = init.await;

            let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if self.state() != BoardState::Live {
                    continue;
                }
                let controller = self.clone();
                tokio::spawn(async move { controller.poll_once().await });
            }
        });

        PollingHandle {
            task,
            active,
            updates,
        }
    }

    async fn fetch_records(&self) -> Result<Vec<DisplayRecord>, ProviderError> {
        let quotes = self.provider.fetch_quotes(&self.symbols).await?;

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(quotes
            .iter()
            .map(|quote| DisplayRecord::from_quote(quote, &mut *rng))
            .collect())
    }

    fn publish(&self, update: impl FnOnce(&mut BoardSnapshot)) {
        if !self.active.load(Ordering::Acquire) {
            debug!("board stopped; dropping update");
            return;
        }
        self.snapshot.send_modify(update);
    }
}

/// Owns the polling timer started by [`PollingController::spawn`].
///
/// Dropping the handle (or calling [`stop`](Self::stop)) aborts the timer.
/// Fetches already in flight run to completion but their results are
/// discarded.
pub struct PollingHandle {
    task: JoinHandle<()>,
    active: Arc<AtomicBool>,
    updates: watch::Receiver<BoardSnapshot>,
}

impl PollingHandle {
    /// New receiver for snapshot changes.
    pub fn updates(&self) -> watch::Receiver<BoardSnapshot> {
        self.updates.clone()
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.updates.borrow().clone()
    }

    /// Stops polling.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        self.task.abort();
    }
}
