//! Stopwatch state machine and elapsed-time formatting

use serde::{Deserialize, Serialize};

use super::fields::ClockTime;

const MILLIS_PER_HOUR: u64 = 3_600_000;
const MILLIS_PER_MINUTE: u64 = 60_000;
const MILLIS_PER_SECOND: u64 = 1_000;

/// Stopwatch run state; timestamps are epoch milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StopwatchState {
    /// No run has started yet
    #[default]
    Empty,
    Started {
        started_at: i64,
    },
    /// A finished run; `stopped_at >= started_at`
    Stopped {
        started_at: i64,
        stopped_at: i64,
    },
}

impl StopwatchState {
    /// Advance the state machine on a user toggle at `now`
    ///
    /// Restarting after a stop begins a fresh run; the previous interval is
    /// discarded.
    pub fn toggle(self, now: i64) -> Self {
        match self {
            StopwatchState::Empty | StopwatchState::Stopped { .. } => {
                StopwatchState::Started { started_at: now }
            }
            StopwatchState::Started { started_at } => StopwatchState::Stopped {
                started_at,
                stopped_at: now.max(started_at),
            },
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, StopwatchState::Started { .. })
    }

    /// Elapsed time of the current or last run
    ///
    /// A running stopwatch measures up to `now`; a stopped one up to its stop
    /// time. `None` when no run has started.
    pub fn elapsed(&self, now: i64) -> Option<ElapsedDuration> {
        match *self {
            StopwatchState::Empty => None,
            StopwatchState::Started { started_at } => {
                Some(ElapsedDuration::from_millis(now.saturating_sub(started_at)))
            }
            StopwatchState::Stopped {
                started_at,
                stopped_at,
            } => Some(ElapsedDuration::from_millis(
                stopped_at.saturating_sub(started_at),
            )),
        }
    }
}

/// Non-negative duration split into clock units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElapsedDuration {
    pub hours: u64,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl ElapsedDuration {
    /// Negative spans clamp to zero
    pub fn from_millis(span: i64) -> Self {
        let total = span.max(0) as u64;

        Self {
            hours: total / MILLIS_PER_HOUR,
            minutes: ((total % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE) as u32,
            seconds: ((total % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND) as u32,
            millis: (total % MILLIS_PER_SECOND) as u32,
        }
    }

    pub fn total_millis(&self) -> u64 {
        self.hours * MILLIS_PER_HOUR
            + self.minutes as u64 * MILLIS_PER_MINUTE
            + self.seconds as u64 * MILLIS_PER_SECOND
            + self.millis as u64
    }

    /// Minute and second, for drawing the stopwatch arc
    pub fn clock_time(&self) -> ClockTime {
        ClockTime {
            minute: self.minutes,
            second: self.seconds,
        }
    }

    pub fn display(&self) -> StopwatchDisplay {
        StopwatchDisplay {
            hour: format!("{:02}", self.hours),
            minute: format!("{:02}", self.minutes),
            second: format!("{:02}", self.seconds),
            millisecond: format!("{:03}", self.millis),
        }
    }
}

/// Zero-padded stopwatch digits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StopwatchDisplay {
    pub hour: String,
    pub minute: String,
    pub second: String,
    pub millisecond: String,
}

impl std::fmt::Display for StopwatchDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}.{}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}
