//! Clock screen state engine
//!
//! Combines the tick source with stopwatch toggles and publishes a fresh
//! [`ClockScreenState`] whenever either input changes.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, TimeZone};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

use super::fields::{ClockFields, ClockTime};
use super::stopwatch::{StopwatchDisplay, StopwatchState};
use super::ticker::{TickReceiver, TickSource, Ticker, DEFAULT_EMIT_INTERVAL, DEFAULT_SAMPLE_INTERVAL};
use super::time::TimeProvider;

/// Everything the clock screen renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClockScreenState {
    pub clock: ClockFields,
    pub stopwatch: StopwatchState,
    /// Stopwatch digits; `None` until the first run starts
    pub elapsed: Option<StopwatchDisplay>,
    /// Stopwatch minute and second, for the stopwatch arc
    pub elapsed_time: Option<ClockTime>,
}

impl ClockScreenState {
    pub fn derive<Tz>(now: i64, stopwatch: StopwatchState, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let elapsed = stopwatch.elapsed(now);

        Self {
            clock: ClockFields::from_timestamp(now, tz),
            stopwatch,
            elapsed: elapsed.map(|e| e.display()),
            elapsed_time: elapsed.map(|e| e.clock_time()),
        }
    }
}

#[derive(Debug)]
enum Command {
    Toggle,
    Cancel,
}

/// Builder for a running clock engine
pub struct ClockEngine<Tz = Local> {
    provider: Arc<dyn TimeProvider>,
    sample_interval: Duration,
    emit_interval: Duration,
    stopwatch: StopwatchState,
    tz: Tz,
}

impl ClockEngine<Local> {
    pub fn new(provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            provider,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            emit_interval: DEFAULT_EMIT_INTERVAL,
            stopwatch: StopwatchState::Empty,
            tz: Local,
        }
    }
}

impl<Tz> ClockEngine<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Display,
{
    pub fn with_intervals(mut self, sample_interval: Duration, emit_interval: Duration) -> Self {
        self.sample_interval = sample_interval;
        self.emit_interval = emit_interval;
        self
    }

    /// Seed the stopwatch, e.g. with a run that started before the screen opened
    pub fn with_stopwatch(mut self, stopwatch: StopwatchState) -> Self {
        self.stopwatch = stopwatch;
        self
    }

    pub fn with_time_zone<T>(self, tz: T) -> ClockEngine<T> {
        ClockEngine {
            provider: self.provider,
            sample_interval: self.sample_interval,
            emit_interval: self.emit_interval,
            stopwatch: self.stopwatch,
            tz,
        }
    }

    /// Start the tick source and the engine on the current tokio runtime
    pub fn spawn(self) -> ClockHandle {
        let ticker = TickSource::new(Arc::clone(&self.provider))
            .with_intervals(self.sample_interval, self.emit_interval)
            .spawn();

        // A seeded run is shown right away, before the first tick
        let initial = match self.stopwatch {
            StopwatchState::Empty => ClockScreenState::default(),
            stopwatch => ClockScreenState::derive(self.provider.now_millis(), stopwatch, &self.tz),
        };
        let (state_tx, state_rx) = watch::channel(initial);
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(
            self.tz,
            self.provider,
            ticker,
            command_rx,
            state_tx,
            self.stopwatch,
        ));

        ClockHandle {
            commands: command_tx,
            state: state_rx,
            task,
        }
    }
}

async fn run<Tz>(
    tz: Tz,
    provider: Arc<dyn TimeProvider>,
    ticker: Ticker,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state: watch::Sender<ClockScreenState>,
    mut stopwatch: StopwatchState,
) where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut ticks: TickReceiver = ticker.subscribe();

    loop {
        let now = tokio::select! {
            changed = ticks.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = *ticks.borrow_and_update();
                match latest {
                    Some(timestamp) => timestamp,
                    None => continue,
                }
            }
            command = commands.recv() => match command {
                Some(Command::Toggle) => {
                    let now = provider.now_millis();
                    stopwatch = stopwatch.toggle(now);
                    tracing::debug!(?stopwatch, "stopwatch toggled");
                    now
                }
                Some(Command::Cancel) | None => break,
            },
        };

        if state
            .send(ClockScreenState::derive(now, stopwatch, &tz))
            .is_err()
        {
            break;
        }
    }

    // Dropping the ticker here stops sampling along with the engine
    drop(ticker);
    tracing::debug!("clock engine stopped");
}

/// Owner handle of a running clock engine
///
/// Dropping the handle cancels the engine.
pub struct ClockHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ClockScreenState>,
    task: JoinHandle<()>,
}

impl ClockHandle {
    /// Toggle the stopwatch; returns `false` once the engine has stopped
    pub fn toggle(&self) -> bool {
        self.commands.send(Command::Toggle).is_ok()
    }

    /// Stop the engine; subscribers see their streams end
    pub fn cancel(&self) {
        let _ = self.commands.send(Command::Cancel);
    }

    /// Most recently published state
    pub fn current(&self) -> ClockScreenState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockScreenState> {
        self.state.clone()
    }

    /// Stream of states, starting with the current one
    pub fn states(&self) -> WatchStream<ClockScreenState> {
        WatchStream::new(self.state.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
