//! In-process event bus.
//!
//! Publish/subscribe keyed by match id. One process-wide bounded queue feeds
//! a dedicated dispatcher task that fans events out to per-match
//! subscribers, each behind its own bounded channel. Publishing never
//! blocks: a full queue or a full subscriber stream drops the event (for
//! that subscriber only) and bumps a counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::GameEvent;

pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy)]
pub struct BusConfig {
    /// Capacity of the process-wide publish queue.
    pub queue_capacity: usize,
    /// Capacity of each subscriber's stream.
    pub subscriber_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            subscriber_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

type SubscriberMap = DashMap<Uuid, Vec<(Uuid, mpsc::Sender<GameEvent>)>>;

pub struct EventBus {
    queue: mpsc::Sender<GameEvent>,
    subscribers: Arc<SubscriberMap>,
    subscriber_capacity: usize,
    cancel: CancellationToken,
    /// Events lost to a full publish queue or full subscriber streams.
    dropped: Arc<AtomicU64>,
}

impl EventBus {
    /// Create the bus and start its dispatcher task.
    pub fn start(config: BusConfig) -> Arc<Self> {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let subscribers: Arc<SubscriberMap> = Arc::new(DashMap::new());
        let cancel = CancellationToken::new();
        let dropped = Arc::new(AtomicU64::new(0));

        tokio::spawn(dispatch_loop(
            rx,
            Arc::clone(&subscribers),
            cancel.clone(),
            Arc::clone(&dropped),
        ));

        Arc::new(Self {
            queue: tx,
            subscribers,
            subscriber_capacity: config.subscriber_capacity,
            cancel,
            dropped,
        })
    }

    /// Enqueue an event; never blocks. A full queue drops the event.
    pub fn publish(&self, event: GameEvent) {
        if let Err(err) = self.queue.try_send(event) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            warn!(error = %err, "event bus queue full, dropping event");
        }
    }

    /// Subscribe to one match's events. The returned guard unsubscribes on
    /// drop; the stream ends once unsubscribed or cleared.
    pub fn subscribe(&self, match_id: Uuid) -> (ReceiverStream<GameEvent>, SubscriptionGuard) {
        let (tx, rx) = mpsc::channel(self.subscriber_capacity);
        let token = Uuid::new_v4();
        self.subscribers.entry(match_id).or_default().push((token, tx));
        (
            ReceiverStream::new(rx),
            SubscriptionGuard {
                subscribers: Arc::clone(&self.subscribers),
                match_id,
                token,
            },
        )
    }

    /// Convenience: run `callback` for each delivered event on a dedicated
    /// consumer task. Dropping the guard stops the task.
    pub fn subscribe_with_callback<F>(&self, match_id: Uuid, mut callback: F) -> SubscriptionGuard
    where
        F: FnMut(GameEvent) + Send + 'static,
    {
        let (mut stream, guard) = self.subscribe(match_id);
        tokio::spawn(async move {
            while let Some(event) = stream.next().await {
                callback(event);
            }
            debug!(%match_id, "event subscription consumer finished");
        });
        guard
    }

    /// Close every subscriber stream for a match.
    pub fn clear_subscribers(&self, match_id: Uuid) {
        self.subscribers.remove(&match_id);
    }

    pub fn dropped_events(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Stop the dispatcher. Already-queued events are not delivered.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventBus {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn dispatch_loop(
    mut rx: mpsc::Receiver<GameEvent>,
    subscribers: Arc<SubscriberMap>,
    cancel: CancellationToken,
    dropped: Arc<AtomicU64>,
) {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = rx.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };

        let match_id = event.match_id();
        if let Some(mut entry) = subscribers.get_mut(&match_id) {
            // Drop-on-full per subscriber; prune channels whose receiver is
            // gone.
            entry.retain(|(_, tx)| !tx.is_closed());
            for (_, tx) in entry.iter() {
                if let Err(mpsc::error::TrySendError::Full(_)) = tx.try_send(event.clone()) {
                    dropped.fetch_add(1, Ordering::Relaxed);
                    warn!(%match_id, "subscriber stream full, dropping event");
                }
            }
        }
    }
    debug!("event bus dispatcher stopped");
}

/// RAII unsubscribe handle.
pub struct SubscriptionGuard {
    subscribers: Arc<SubscriberMap>,
    match_id: Uuid,
    token: Uuid,
}

impl SubscriptionGuard {
    pub fn unsubscribe(self) {}
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(mut entry) = self.subscribers.get_mut(&self.match_id) {
            entry.retain(|(token, _)| *token != self.token);
        }
    }
}
