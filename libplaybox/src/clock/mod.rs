//! Clock and stopwatch
//!
//! A [`TickSource`] samples a [`TimeProvider`] and delivers timestamps at a
//! fixed rate. The [`ClockEngine`] turns those ticks, together with stopwatch
//! toggles, into [`ClockScreenState`] snapshots.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use libplaybox::clock::{ClockEngine, SystemClock};
//!
//! # async fn example() {
//! let handle = ClockEngine::new(Arc::new(SystemClock)).spawn();
//! let mut states = Box::pin(handle.states());
//!
//! handle.toggle();
//! while let Some(state) = states.next().await {
//!     println!("{}:{}:{}", state.clock.hour, state.clock.minute, state.clock.second);
//! }
//! # }
//! ```

pub mod engine;
pub mod fields;
pub mod stopwatch;
pub mod ticker;
pub mod time;

pub use engine::{ClockEngine, ClockHandle, ClockScreenState};
pub use fields::{ArcGeometry, ClockFields, ClockTime};
pub use stopwatch::{ElapsedDuration, StopwatchDisplay, StopwatchState};
pub use ticker::{TickSource, Ticker};
pub use time::{ManualClock, SystemClock, TimeProvider};
