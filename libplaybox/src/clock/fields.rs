//! Calendar fields and clock face geometry derived from a timestamp

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::Serialize;

/// Minute and second of a timestamp, used to drive the clock face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClockTime {
    pub minute: u32,
    pub second: u32,
}

/// Arc to draw on the clock face, in degrees; 0 is three o'clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcGeometry {
    pub start_angle: f32,
    pub sweep_angle: f32,
}

impl ClockTime {
    /// Even minutes fill the circle, odd minutes empty it again
    pub fn fill_circle(&self) -> bool {
        self.minute % 2 == 0
    }

    /// Fraction of the minute covered, centered on the current second
    pub fn sweep_fraction(&self) -> f32 {
        (self.second as f32 + 0.5) / 60.0
    }

    /// Arc for the current second, `None` on second 0 where the face resets
    pub fn arc(&self) -> Option<ArcGeometry> {
        if self.second == 0 {
            return None;
        }

        let sweep = self.sweep_fraction() * 360.0;
        let geometry = if self.fill_circle() {
            ArcGeometry {
                start_angle: -90.0,
                sweep_angle: sweep,
            }
        } else {
            ArcGeometry {
                start_angle: -90.0 + sweep,
                sweep_angle: 360.0 - sweep,
            }
        };

        Some(geometry)
    }
}

/// Display-ready clock snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClockFields {
    /// Full weekday name, e.g. "Friday"
    pub weekday: String,
    /// Day and abbreviated month, e.g. "5 Jan"
    pub day_month: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
    pub numbers: ClockTime,
}

impl ClockFields {
    pub fn from_timestamp<Tz>(timestamp_millis: i64, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        // Out-of-range timestamps fall back to the epoch rather than failing
        let utc: DateTime<Utc> = DateTime::from_timestamp_millis(timestamp_millis).unwrap_or_default();
        let date = utc.with_timezone(tz);

        Self {
            weekday: date.format("%A").to_string(),
            day_month: date.format("%-d %b").to_string(),
            hour: date.format("%H").to_string(),
            minute: date.format("%M").to_string(),
            second: date.format("%S").to_string(),
            numbers: ClockTime {
                minute: date.minute(),
                second: date.second(),
            },
        }
    }

    /// Derive in the system time zone
    pub fn local(timestamp_millis: i64) -> Self {
        Self::from_timestamp(timestamp_millis, &chrono::Local)
    }
}
