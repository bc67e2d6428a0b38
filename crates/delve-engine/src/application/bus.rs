//! Broadcast bus for rendered session snapshots.
//!
//! One bounded ring buffer is shared by all subscribers. Publishing never
//! waits: a subscriber that falls more than `capacity` snapshots behind
//! loses the oldest ones and resumes from the oldest snapshot still held.
//! Subscribers only see snapshots published after they subscribed.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};
use tracing::{trace, warn};

/// Default buffer size, in snapshots.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// Publishing side of the bus. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StateBus {
    sender: broadcast::Sender<String>,
}

impl StateBus {
    /// Creates a bus buffering up to `capacity` snapshots (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a snapshot to every current subscriber.
    ///
    /// Returns how many subscribers it was delivered to; with none the
    /// snapshot is simply dropped.
    pub fn publish(&self, rendered: String) -> usize {
        match self.sender.send(rendered) {
            Ok(receivers) => receivers,
            Err(_) => {
                trace!("no subscribers for state snapshot");
                0
            }
        }
    }

    /// Starts receiving snapshots published from now on.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            dropped: 0,
        }
    }
}

impl Default for StateBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

/// One viewer's ordered view of the bus.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<String>,
    dropped: u64,
}

impl Subscription {
    /// Waits for the next snapshot. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<String> {
        loop {
            match self.receiver.recv().await {
                Ok(rendered) => return Some(rendered),
                Err(RecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next buffered snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<String> {
        loop {
            match self.receiver.try_recv() {
                Ok(rendered) => return Some(rendered),
                Err(TryRecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Snapshots this subscriber lost to buffer overflow so far.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Converts the subscription into a stream, e.g. for server-sent events.
    pub fn into_stream(self) -> impl Stream<Item = String> + Send + 'static {
        BroadcastStream::new(self.receiver).filter_map(|item| match item {
            Ok(rendered) => Some(rendered),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(skipped, "subscriber lagged; oldest snapshots dropped");
                None
            }
        })
    }

    fn record_lag(&mut self, skipped: u64) {
        warn!(skipped, "subscriber lagged; oldest snapshots dropped");
        self.dropped += skipped;
    }
}
