//! Source of "now" for the picker constraints
//!
//! The selector never reads the wall clock itself. The app owns a [`Clock`]
//! and pushes fresh readings in on its own schedule.

use chrono::{NaiveTime, Timelike};

pub trait Clock {
    fn now(&self) -> NaiveTime;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        let now = chrono::Local::now().time();
        // Seconds don't matter to the picker, keep readings stable within a minute
        NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
    }
}

/// Always returns the same time (`--now`, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Parse "HH:MM" as given on the command line
pub fn parse_hh_mm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}
