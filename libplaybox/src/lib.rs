//! Playbox - headless clock, stopwatch and photo gallery cores
//!
//! This library provides the state engines behind the Playbox screens: a
//! sampled clock with a toggleable stopwatch, and a Flickr tag search that is
//! normalized into a single outcome type and mapped to display-ready records.
//! Front ends subscribe to latest-value state channels and render however
//! they like.

pub mod clock;
pub mod config;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod service;

// Re-export commonly used types
pub use clock::{ClockEngine, ClockHandle, ClockScreenState, StopwatchState};
pub use config::Config;
pub use error::{ApiError, Outcome, PlayboxError, Result};
pub use gallery::{GalleryScreenState, PhotoRecord, RequestParams, SearchRequest, Size};
pub use service::PlayboxService;
