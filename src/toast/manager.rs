// SPDX-License-Identifier: MPL-2.0
//! Queue ownership and expiry scheduling for toasts.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tokio::time;
use tracing::{debug, trace};

use crate::config::ToastConfig;
use crate::error::{Error, Result};

use super::entry::{Toast, ToastEntry, ToastId};

enum Command {
    Push(ToastEntry),
    Dismiss(ToastId),
    Clear,
    Shutdown,
}

/// Handle to a toast queue driver task.
///
/// The driver owns the queue in first-in-first-out order and one expiry
/// timer per non-sticky entry. Every mutation publishes a fresh snapshot
/// of the queue over a watch channel; [`subscribe`](Self::subscribe)
/// hands out receivers for it.
///
/// Dropping the handle stops the driver, cancels all timers, and closes
/// every subscription. [`shutdown`](Self::shutdown) does the same while
/// the handle is still around.
pub struct ToastManager {
    config: ToastConfig,
    command_tx: mpsc::UnboundedSender<Command>,
    snapshot_rx: watch::Receiver<Vec<ToastEntry>>,
}

impl ToastManager {
    /// Spawns the driver task and returns its handle.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(config: ToastConfig) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());
        tokio::spawn(run_driver(command_rx, snapshot_tx));
        Self {
            config,
            command_tx,
            snapshot_rx,
        }
    }

    /// Queues a toast and returns its id.
    ///
    /// Sticky toasts get no expiry timer. Otherwise the toast's own ttl
    /// applies, falling back to the configured default duration. After
    /// [`shutdown`](Self::shutdown) the toast is silently discarded; the
    /// returned id then never shows up in any snapshot.
    pub fn push(&self, toast: Toast) -> ToastId {
        let entry = self.make_entry(toast);
        let id = entry.id();
        let _ = self.command_tx.send(Command::Push(entry));
        id
    }

    /// Like [`push`](Self::push) but reports whether the driver is still
    /// accepting commands.
    pub fn try_push(&self, toast: Toast) -> Result<ToastId> {
        let entry = self.make_entry(toast);
        let id = entry.id();
        self.command_tx
            .send(Command::Push(entry))
            .map_err(|_| Error::Closed("toast manager".to_string()))?;
        Ok(id)
    }

    /// Allocates an id and resolves the effective ttl.
    fn make_entry(&self, toast: Toast) -> ToastEntry {
        let ttl = if toast.is_sticky() {
            None
        } else {
            Some(
                toast
                    .requested_ttl()
                    .unwrap_or_else(|| self.config.default_duration()),
            )
        };
        ToastEntry::new(ToastId::new(), toast, ttl)
    }

    /// Removes a toast early and cancels its expiry timer.
    ///
    /// Unknown or already-gone ids are ignored.
    pub fn dismiss(&self, id: ToastId) {
        let _ = self.command_tx.send(Command::Dismiss(id));
    }

    /// Like [`dismiss`](Self::dismiss) but reports whether the driver is
    /// still accepting commands.
    pub fn try_dismiss(&self, id: ToastId) -> Result<()> {
        self.command_tx
            .send(Command::Dismiss(id))
            .map_err(|_| Error::Closed("toast manager".to_string()))
    }

    /// Removes every queued toast at once.
    pub fn clear(&self) {
        let _ = self.command_tx.send(Command::Clear);
    }

    /// Like [`clear`](Self::clear) but reports whether the driver is
    /// still accepting commands.
    pub fn try_clear(&self) -> Result<()> {
        self.command_tx
            .send(Command::Clear)
            .map_err(|_| Error::Closed("toast manager".to_string()))
    }

    /// Stops the driver without waiting for the handle to drop. All
    /// timers are cancelled and subscriptions close. Subsequent `try_*`
    /// calls return [`Error::Closed`].
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown);
    }

    /// Returns the latest published queue snapshot, oldest toast first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ToastEntry> {
        self.snapshot_rx.borrow().clone()
    }

    /// Returns a receiver of queue snapshots.
    ///
    /// Rapid mutations may be coalesced; the receiver always observes
    /// the latest snapshot. The channel closes when the driver stops.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<ToastEntry>> {
        self.snapshot_rx.clone()
    }

    /// Number of toasts in the latest published snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot_rx.borrow().len()
    }

    /// Whether the latest published snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot_rx.borrow().is_empty()
    }

    /// Returns the configuration the driver was started with.
    #[must_use]
    pub fn config(&self) -> ToastConfig {
        self.config
    }
}

impl fmt::Debug for ToastManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

async fn run_driver(
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<Vec<ToastEntry>>,
) {
    let (expiry_tx, mut expiry_rx) = mpsc::unbounded_channel();
    let mut entries: VecDeque<ToastEntry> = VecDeque::new();
    let mut timers: HashMap<ToastId, AbortHandle> = HashMap::new();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Push(entry)) => {
                    let id = entry.id();
                    if let Some(ttl) = entry.ttl() {
                        let expiry_tx = expiry_tx.clone();
                        let timer = tokio::spawn(async move {
                            time::sleep(ttl).await;
                            let _ = expiry_tx.send(id);
                        });
                        timers.insert(id, timer.abort_handle());
                    }
                    trace!(id = ?id, kind = ?entry.kind(), "toast pushed");
                    entries.push_back(entry);
                    publish(&snapshots, &entries);
                }
                Some(Command::Dismiss(id)) => {
                    if remove_entry(&mut entries, &mut timers, id) {
                        debug!(id = ?id, "toast dismissed");
                        publish(&snapshots, &entries);
                    }
                }
                Some(Command::Clear) => {
                    for (_, timer) in timers.drain() {
                        timer.abort();
                    }
                    if !entries.is_empty() {
                        entries.clear();
                        debug!("all toasts cleared");
                        publish(&snapshots, &entries);
                    }
                }
                Some(Command::Shutdown) | None => break,
            },
            Some(id) = expiry_rx.recv() => {
                if remove_entry(&mut entries, &mut timers, id) {
                    trace!(id = ?id, "toast expired");
                    publish(&snapshots, &entries);
                }
            }
        }
    }

    for (_, timer) in timers.drain() {
        timer.abort();
    }
    trace!("toast driver stopped");
}

/// Removes the entry with the given id and cancels its timer, if any.
/// Stale expiries for ids that were already dismissed land here and do
/// nothing.
fn remove_entry(
    entries: &mut VecDeque<ToastEntry>,
    timers: &mut HashMap<ToastId, AbortHandle>,
    id: ToastId,
) -> bool {
    if let Some(timer) = timers.remove(&id) {
        timer.abort();
    }
    match entries.iter().position(|entry| entry.id() == id) {
        Some(index) => {
            entries.remove(index);
            true
        }
        None => false,
    }
}

fn publish(snapshots: &watch::Sender<Vec<ToastEntry>>, entries: &VecDeque<ToastEntry>) {
    let _ = snapshots.send(entries.iter().cloned().collect());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn manager(default_duration_ms: u64) -> ToastManager {
        ToastManager::new(ToastConfig {
            default_duration_ms,
        })
    }

    fn titles(entries: &[ToastEntry]) -> Vec<&str> {
        entries.iter().map(ToastEntry::title).collect()
    }

    fn spawn_collector(
        mut updates: watch::Receiver<Vec<ToastEntry>>,
    ) -> mpsc::UnboundedReceiver<Vec<ToastEntry>> {
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

    fn drain(seen: &mut mpsc::UnboundedReceiver<Vec<ToastEntry>>) -> Vec<Vec<ToastEntry>> {
        let mut snapshots = Vec::new();
        while let Ok(snapshot) = seen.try_recv() {
            snapshots.push(snapshot);
        }
        snapshots
    }

    #[tokio::test(start_paused = true)]
    async fn pushed_toasts_appear_in_fifo_order() {
        let toasts = manager(100);

        let first = toasts.push(Toast::success("Saved"));
        let second = toasts.push(Toast::error("Sync failed"));
        time::sleep(Duration::from_millis(1)).await;

        assert_ne!(first, second);
        assert_eq!(titles(&toasts.snapshot()), vec!["Saved", "Sync failed"]);
    }

    #[tokio::test(start_paused = true)]
    async fn toast_expires_after_default_duration() {
        let toasts = manager(100);
        toasts.push(Toast::info("Copied"));

        time::sleep(Duration::from_millis(90)).await;
        assert_eq!(toasts.len(), 1);

        time::sleep(Duration::from_millis(20)).await;
        assert!(toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn per_toast_ttl_overrides_the_default() {
        let toasts = manager(100);
        toasts.push(Toast::info("Long job").ttl(Duration::from_millis(500)));

        time::sleep(Duration::from_millis(450)).await;
        assert_eq!(toasts.len(), 1);

        time::sleep(Duration::from_millis(100)).await;
        assert!(toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sticky_toast_outlives_the_default_duration() {
        let toasts = manager(100);
        let id = toasts.push(Toast::warning("Disk almost full").sticky());

        time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(toasts.len(), 1);
        assert!(toasts.snapshot()[0].is_sticky());

        toasts.dismiss(id);
        time::sleep(Duration::from_millis(1)).await;
        assert!(toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sticky_takes_precedence_over_ttl() {
        let toasts = manager(100);
        toasts.push(Toast::info("Pinned").ttl(Duration::from_millis(100)).sticky());

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(toasts.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_cancels_the_expiry_timer() {
        let toasts = manager(100);
        let mut seen = spawn_collector(toasts.subscribe());

        let id = toasts.push(Toast::info("Copied"));
        time::sleep(Duration::from_millis(10)).await;
        toasts.dismiss(id);
        time::sleep(Duration::from_millis(1)).await;

        assert!(toasts.is_empty());
        drain(&mut seen);

        // Past the original deadline nothing fires again.
        time::sleep(Duration::from_millis(200)).await;
        assert!(drain(&mut seen).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_an_unknown_id_changes_nothing() {
        let toasts = manager(100);
        let mut seen = spawn_collector(toasts.subscribe());

        let id = toasts.push(Toast::info("Copied"));
        time::sleep(Duration::from_millis(1)).await;
        toasts.dismiss(id);
        time::sleep(Duration::from_millis(1)).await;
        drain(&mut seen);

        toasts.dismiss(id);
        time::sleep(Duration::from_millis(1)).await;
        assert!(drain(&mut seen).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ttl_toast_expires_on_the_next_timer_turn() {
        let toasts = manager(100);
        toasts.push(Toast::info("Blink").ttl(Duration::ZERO));

        time::sleep(Duration::from_millis(1)).await;
        assert!(toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_empties_the_queue_and_cancels_timers() {
        let toasts = manager(100);
        let mut seen = spawn_collector(toasts.subscribe());

        toasts.push(Toast::success("One"));
        toasts.push(Toast::info("Two").ttl(Duration::from_millis(500)));
        toasts.push(Toast::warning("Three").sticky());
        time::sleep(Duration::from_millis(1)).await;
        assert_eq!(toasts.len(), 3);

        toasts.clear();
        time::sleep(Duration::from_millis(1)).await;
        assert!(toasts.is_empty());
        drain(&mut seen);

        time::sleep(Duration::from_millis(600)).await;
        assert!(drain(&mut seen).is_empty());
        assert!(toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_rejects_further_commands() {
        let toasts = manager(100);
        assert!(toasts.try_push(Toast::info("Before")).is_ok());

        toasts.shutdown();
        time::sleep(Duration::from_millis(1)).await;

        let error = toasts.try_push(Toast::info("After")).unwrap_err();
        assert!(matches!(error, Error::Closed(_)));
        assert!(toasts.try_clear().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_closes_subscriptions() {
        let toasts = manager(100);
        let mut updates = toasts.subscribe();

        toasts.push(Toast::info("Copied"));
        drop(toasts);

        while updates.changed().await.is_ok() {}
        assert!(updates.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn len_tracks_published_snapshots() {
        let toasts = manager(100);
        assert!(toasts.is_empty());

        toasts.push(Toast::success("Saved").sticky());
        time::sleep(Duration::from_millis(1)).await;
        assert_eq!(toasts.len(), 1);

        toasts.clear();
        time::sleep(Duration::from_millis(1)).await;
        assert!(toasts.is_empty());
    }
}
