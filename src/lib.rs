use chrono::TimeZone;
use log::debug;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub mod components;
pub mod config;
pub mod hooks;
pub mod query;
pub mod utils;

use config::{DEFAULT_TITLE, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use query::{QueryParams, TargetDate};

/// Remaining time until the target, split into whole units.
///
/// The unit fields are successive remainders of one duration, so `hours < 24`,
/// `minutes < 60` and `seconds < 60` always hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownSnapshot {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub total_remaining_ms: u64,
    pub is_complete: bool,
}

impl CountdownSnapshot {
    /// Milliseconds covered by the whole-unit fields (sub-second part dropped).
    pub fn whole_units_ms(&self) -> u64 {
        self.days * MS_PER_DAY
            + u64::from(self.hours) * MS_PER_HOUR
            + u64::from(self.minutes) * MS_PER_MINUTE
            + u64::from(self.seconds) * MS_PER_SECOND
    }
}

/// Decompose `target_ms - now_ms` into days/hours/minutes/seconds, clamped at zero.
///
/// Both arguments are Unix epoch milliseconds. The function is total: a target in
/// the past (or equal to now) yields an all-zero, complete snapshot.
pub fn countdown_parts(target_ms: i64, now_ms: i64) -> CountdownSnapshot {
    let delta = target_ms.saturating_sub(now_ms);
    let clamped = u64::try_from(delta).unwrap_or(0);

    let days = clamped / MS_PER_DAY;
    let day_remainder = clamped % MS_PER_DAY;
    let hours = day_remainder / MS_PER_HOUR;
    let hour_remainder = day_remainder % MS_PER_HOUR;
    let minutes = hour_remainder / MS_PER_MINUTE;
    let minute_remainder = hour_remainder % MS_PER_MINUTE;
    let seconds = minute_remainder / MS_PER_SECOND;

    CountdownSnapshot {
        days,
        // bounded by 24 / 60 / 60 respectively
        hours: hours as u32,
        minutes: minutes as u32,
        seconds: seconds as u32,
        total_remaining_ms: clamped,
        is_complete: delta <= 0,
    }
}

/// Minimum-interval gate for the animation-frame loop.
///
/// Fed with frame timestamps (`performance.now()` milliseconds); lets a frame through
/// only when at least `min_interval_ms` elapsed since the last accepted one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameThrottle {
    last: f64,
    min_interval_ms: f64,
}

impl FrameThrottle {
    pub fn new(start: f64, min_interval_ms: f64) -> Self {
        Self {
            last: start,
            min_interval_ms,
        }
    }

    /// Returns `true` (and records `timestamp`) when the frame should resample the clock.
    pub fn ready(&mut self, timestamp: f64) -> bool {
        if timestamp - self.last >= self.min_interval_ms {
            self.last = timestamp;
            true
        } else {
            false
        }
    }
}

/// Title and target resolved once per page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSession {
    pub title: String,
    pub target: TargetDate,
}

impl Default for PageSession {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            target: TargetDate::default_target(),
        }
    }
}

impl PageSession {
    /// Resolve the session from a full page URL, falling back per field.
    pub fn from_href(href: &str) -> Self {
        let session = QueryParams::from_href(href).resolve();
        debug!(
            "Resolved session: title={:?}, target={}",
            session.title, session.target
        );
        session
    }

    /// Target instant as epoch milliseconds, reading offset-less targets in `tz`.
    pub fn target_ms_in<Tz: TimeZone>(&self, tz: &Tz) -> i64 {
        self.target.epoch_ms_in(tz)
    }
}

/// Page-script entry point: snapshot for the given epoch-millisecond pair.
///
/// Returns an object with camelCase keys (`days`, `hours`, …, `isComplete`),
/// or `null` if serialization fails.
#[wasm_bindgen(js_name = countdownSnapshot)]
pub fn countdown_snapshot(target_ms: f64, now_ms: f64) -> JsValue {
    let snapshot = countdown_parts(target_ms as i64, now_ms as i64);
    serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
}
