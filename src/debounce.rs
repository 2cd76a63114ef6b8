// SPDX-License-Identifier: MPL-2.0
//! Debounced value coordination for rapidly changing inputs.
//!
//! A [`Debouncer`] accepts every raw value immediately but only promotes a
//! value to "settled" after a configurable quiet period with no further
//! updates. Each [`set`](Debouncer::set) restarts the quiet period, so a
//! burst of updates produces exactly one settle carrying the last value of
//! the burst.
//!
//! State lives in a driver task owned by the handle. The driver publishes
//! [`DebounceState`] snapshots over a watch channel; dropping the handle
//! closes the command channel, which stops the driver and ends every
//! subscription. Any value still pending at teardown is discarded.

use std::fmt;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time;
use tracing::{debug, trace};

use crate::config::DebounceConfig;
use crate::error::{Error, Result};

/// Snapshot of a debouncer's observable state.
///
/// `raw` tracks the most recent input, `settled` the last value that
/// survived a full quiet period, and `pending` whether a settle is
/// currently scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct DebounceState<T> {
    /// Most recent value passed to [`Debouncer::set`].
    pub raw: Option<T>,
    /// Last value promoted after an undisturbed quiet period.
    pub settled: Option<T>,
    /// Whether a quiet period is currently running.
    pub pending: bool,
}

impl<T> Default for DebounceState<T> {
    fn default() -> Self {
        Self {
            raw: None,
            settled: None,
            pending: false,
        }
    }
}

enum Command<T> {
    Set(T),
    Flush,
    Cancel,
    Shutdown,
}

/// Handle to a debounce driver task.
///
/// # Example
///
/// ```
/// use statekit::config::DebounceConfig;
/// use statekit::debounce::Debouncer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let debouncer = Debouncer::new(DebounceConfig::default());
/// let mut updates = debouncer.subscribe();
///
/// debouncer.set("hel");
/// debouncer.set("hello");
/// debouncer.flush();
///
/// while updates.changed().await.is_ok() {
///     if updates.borrow().settled.is_some() {
///         break;
///     }
/// }
/// assert_eq!(updates.borrow().settled, Some("hello"));
/// # }
/// ```
pub struct Debouncer<T> {
    config: DebounceConfig,
    command_tx: mpsc::UnboundedSender<Command<T>>,
    state_rx: watch::Receiver<DebounceState<T>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns the driver task and returns its handle.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(config: DebounceConfig) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(DebounceState::default());
        tokio::spawn(run_driver(config.delay(), command_rx, state_tx));
        Self {
            config,
            command_tx,
            state_rx,
        }
    }

    /// Records a new raw value and restarts the quiet period.
    ///
    /// Ignored after [`shutdown`](Self::shutdown).
    pub fn set(&self, value: T) {
        let _ = self.command_tx.send(Command::Set(value));
    }

    /// Like [`set`](Self::set) but reports whether the driver is still
    /// accepting commands.
    pub fn try_set(&self, value: T) -> Result<()> {
        self.command_tx
            .send(Command::Set(value))
            .map_err(|_| Error::Closed("debouncer".to_string()))
    }

    /// Settles the pending value immediately instead of waiting out the
    /// quiet period. No-op when nothing is pending.
    pub fn flush(&self) {
        let _ = self.command_tx.send(Command::Flush);
    }

    /// Like [`flush`](Self::flush) but reports whether the driver is
    /// still accepting commands.
    pub fn try_flush(&self) -> Result<()> {
        self.command_tx
            .send(Command::Flush)
            .map_err(|_| Error::Closed("debouncer".to_string()))
    }

    /// Discards the pending value without settling it. The raw value is
    /// kept. No-op when nothing is pending.
    pub fn cancel(&self) {
        let _ = self.command_tx.send(Command::Cancel);
    }

    /// Like [`cancel`](Self::cancel) but reports whether the driver is
    /// still accepting commands.
    pub fn try_cancel(&self) -> Result<()> {
        self.command_tx
            .send(Command::Cancel)
            .map_err(|_| Error::Closed("debouncer".to_string()))
    }

    /// Stops the driver without waiting for the handle to drop. A value
    /// still pending is discarded. Subsequent `try_*` calls return
    /// [`Error::Closed`].
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown);
    }

    /// Returns the current state snapshot.
    #[must_use]
    pub fn state(&self) -> DebounceState<T> {
        self.state_rx.borrow().clone()
    }

    /// Returns a receiver of state snapshots.
    ///
    /// Rapid updates may be coalesced; the receiver always observes the
    /// latest snapshot. The channel closes when the driver stops.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DebounceState<T>> {
        self.state_rx.clone()
    }

    /// Returns the configuration the driver was started with.
    #[must_use]
    pub fn config(&self) -> DebounceConfig {
        self.config
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

async fn run_driver<T>(
    delay: Duration,
    mut commands: mpsc::UnboundedReceiver<Command<T>>,
    state: watch::Sender<DebounceState<T>>,
) where
    T: Clone,
{
    loop {
        let pending = state.borrow().pending;
        let command = if pending {
            match time::timeout(delay, commands.recv()).await {
                Ok(command) => command,
                Err(_elapsed) => {
                    settle(&state);
                    trace!("quiet period elapsed; value settled");
                    continue;
                }
            }
        } else {
            commands.recv().await
        };

        match command {
            Some(Command::Set(value)) => {
                state.send_modify(|current| {
                    current.raw = Some(value);
                    current.pending = true;
                });
                trace!("raw value updated; quiet period restarted");
            }
            Some(Command::Flush) => {
                if state.borrow().pending {
                    settle(&state);
                    debug!("pending value flushed");
                }
            }
            Some(Command::Cancel) => {
                if state.borrow().pending {
                    state.send_modify(|current| current.pending = false);
                    debug!("pending value discarded");
                }
            }
            Some(Command::Shutdown) | None => break,
        }
    }
    trace!("debounce driver stopped");
}

fn settle<T>(state: &watch::Sender<DebounceState<T>>)
where
    T: Clone,
{
    state.send_modify(|current| {
        current.settled = current.raw.clone();
        current.pending = false;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(delay_ms: u64) -> DebounceConfig {
        DebounceConfig { delay_ms }
    }

    /// Forwards every observed snapshot into an unbounded queue so tests
    /// can assert on the sequence after the fact.
    fn spawn_collector<T>(
        mut updates: watch::Receiver<DebounceState<T>>,
    ) -> mpsc::UnboundedReceiver<DebounceState<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let (seen_tx, seen_rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                let snapshot = updates.borrow().clone();
                if seen_tx.send(snapshot).is_err() {
                    break;
                }
            }
        });
        seen_rx
    }

    fn drain<T>(seen: &mut mpsc::UnboundedReceiver<DebounceState<T>>) -> Vec<DebounceState<T>> {
        let mut states = Vec::new();
        while let Ok(state) = seen.try_recv() {
            states.push(state);
        }
        states
    }

    #[tokio::test(start_paused = true)]
    async fn initial_state_is_empty() {
        let debouncer: Debouncer<String> = Debouncer::new(config(100));
        let state = debouncer.state();
        assert_eq!(state.raw, None);
        assert_eq!(state.settled, None);
        assert!(!state.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn set_marks_pending_without_settling() {
        let debouncer = Debouncer::new(config(100));
        debouncer.set("a");
        time::sleep(Duration::from_millis(1)).await;

        let state = debouncer.state();
        assert_eq!(state.raw, Some("a"));
        assert_eq!(state.settled, None);
        assert!(state.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_sets_settle_once_with_last_value() {
        let debouncer = Debouncer::new(config(100));
        let mut seen = spawn_collector(debouncer.subscribe());

        for value in ["h", "he", "hel"] {
            debouncer.set(value);
            time::sleep(Duration::from_millis(50)).await;
        }
        time::sleep(Duration::from_millis(200)).await;

        let states = drain(&mut seen);
        let settles: Vec<_> = states
            .iter()
            .filter(|state| state.settled.is_some() && !state.pending)
            .collect();
        assert_eq!(settles.len(), 1);
        assert_eq!(settles[0].settled, Some("hel"));
        assert!(states.iter().all(|state| state.settled != Some("h")));
        assert!(states.iter().all(|state| state.settled != Some("he")));
    }

    #[tokio::test(start_paused = true)]
    async fn settles_custom_value_types() {
        #[derive(Debug, Clone, PartialEq)]
        struct Query {
            text: String,
            page: u32,
        }

        fn query(text: &str) -> Query {
            Query {
                text: text.to_string(),
                page: 1,
            }
        }

        let debouncer = Debouncer::new(config(100));
        debouncer.set(query("d"));
        time::sleep(Duration::from_millis(50)).await;
        debouncer.set(query("dash"));
        time::sleep(Duration::from_millis(150)).await;

        let state = debouncer.state();
        assert_eq!(state.settled, Some(query("dash")));
        assert!(!state.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn each_set_restarts_the_quiet_period() {
        let debouncer = Debouncer::new(config(100));

        debouncer.set("a");
        time::sleep(Duration::from_millis(80)).await;
        debouncer.set("ab");
        time::sleep(Duration::from_millis(80)).await;

        // 160ms in, but only 80ms since the last update.
        let state = debouncer.state();
        assert_eq!(state.settled, None);
        assert!(state.pending);

        time::sleep(Duration::from_millis(30)).await;
        let state = debouncer.state();
        assert_eq!(state.settled, Some("ab"));
        assert!(!state.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_settles_immediately() {
        let debouncer = Debouncer::new(config(100));

        debouncer.set("abc");
        time::sleep(Duration::from_millis(1)).await;
        debouncer.flush();
        time::sleep(Duration::from_millis(1)).await;

        let state = debouncer.state();
        assert_eq!(state.settled, Some("abc"));
        assert!(!state.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_without_pending_value_is_noop() {
        let debouncer: Debouncer<String> = Debouncer::new(config(100));
        debouncer.flush();
        time::sleep(Duration::from_millis(1)).await;
        assert_eq!(debouncer.state(), DebounceState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_value() {
        let debouncer = Debouncer::new(config(100));

        debouncer.set("abc");
        time::sleep(Duration::from_millis(1)).await;
        debouncer.cancel();
        time::sleep(Duration::from_millis(200)).await;

        let state = debouncer.state();
        assert_eq!(state.raw, Some("abc"));
        assert_eq!(state.settled, None);
        assert!(!state.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn set_after_settle_starts_a_new_cycle() {
        let debouncer = Debouncer::new(config(100));
        let mut seen = spawn_collector(debouncer.subscribe());

        debouncer.set("a");
        time::sleep(Duration::from_millis(150)).await;
        debouncer.set("b");
        time::sleep(Duration::from_millis(150)).await;

        let states = drain(&mut seen);
        let settles: Vec<_> = states
            .iter()
            .filter(|state| !state.pending)
            .filter_map(|state| state.settled)
            .collect();
        assert_eq!(settles, vec!["a", "b"]);
        assert_eq!(debouncer.state().settled, Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_rejects_further_commands() {
        let debouncer = Debouncer::new(config(100));

        debouncer.shutdown();
        time::sleep(Duration::from_millis(1)).await;

        let error = debouncer.try_set("late").unwrap_err();
        assert!(matches!(error, Error::Closed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_discards_pending_value() {
        let debouncer = Debouncer::new(config(100));
        let mut updates = debouncer.subscribe();

        debouncer.set("abc");
        time::sleep(Duration::from_millis(1)).await;
        debouncer.shutdown();
        time::sleep(Duration::from_millis(200)).await;

        assert_eq!(debouncer.state().settled, None);
        // The pending value never settles; the channel just closes.
        while updates.changed().await.is_ok() {
            assert!(updates.borrow().settled.is_none());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_closes_subscriptions() {
        let debouncer: Debouncer<String> = Debouncer::new(config(100));
        let mut updates = debouncer.subscribe();

        drop(debouncer);
        time::sleep(Duration::from_millis(1)).await;

        assert!(updates.changed().await.is_err());
    }
}
