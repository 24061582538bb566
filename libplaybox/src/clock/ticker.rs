//! Periodic timestamp source
//!
//! The provider is sampled every `sample_interval` and the most recent sample
//! is delivered every `emit_interval`. Delivery goes through a single-slot
//! `watch` channel: a slow reader only ever sees the newest timestamp and
//! nothing queues up behind it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};

use super::time::TimeProvider;

pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_EMIT_INTERVAL: Duration = Duration::from_millis(200);

/// Receiver side of a running tick source; `None` until the first delivery
pub type TickReceiver = watch::Receiver<Option<i64>>;

pub struct TickSource {
    provider: Arc<dyn TimeProvider>,
    sample_interval: Duration,
    emit_interval: Duration,
}

impl TickSource {
    pub fn new(provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            provider,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            emit_interval: DEFAULT_EMIT_INTERVAL,
        }
    }

    pub fn with_intervals(mut self, sample_interval: Duration, emit_interval: Duration) -> Self {
        self.sample_interval = sample_interval;
        self.emit_interval = emit_interval;
        self
    }

    /// Start sampling on the current tokio runtime
    pub fn spawn(self) -> Ticker {
        let (sender, receiver) = watch::channel(None);
        let task = tokio::spawn(run(
            self.provider,
            self.sample_interval,
            self.emit_interval,
            sender,
        ));

        Ticker { receiver, task }
    }
}

async fn run(
    provider: Arc<dyn TimeProvider>,
    sample_interval: Duration,
    emit_interval: Duration,
    sender: watch::Sender<Option<i64>>,
) {
    let mut sample = interval(sample_interval);
    sample.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut emit = interval_at(Instant::now() + emit_interval, emit_interval);
    emit.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut pending: Option<i64> = None;

    loop {
        // Sampling wins ties so a delivery carries the sample taken at the same instant
        tokio::select! {
            biased;
            _ = sample.tick() => {
                pending = Some(provider.now_millis());
            }
            _ = emit.tick() => {
                if let Some(timestamp) = pending.take() {
                    if sender.send(Some(timestamp)).is_err() {
                        break;
                    }
                }
            }
        }
    }

    tracing::debug!("tick source stopped");
}

/// Handle to a running tick source; dropping it stops sampling
pub struct Ticker {
    receiver: TickReceiver,
    task: JoinHandle<()>,
}

impl Ticker {
    pub fn subscribe(&self) -> TickReceiver {
        self.receiver.clone()
    }

    /// Most recently delivered timestamp
    pub fn latest(&self) -> Option<i64> {
        *self.receiver.borrow()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
