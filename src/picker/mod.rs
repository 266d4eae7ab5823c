//! Constrained hour/minute selection model
//!
//! Nothing in here knows about the terminal. The wheels talk to whatever
//! implements [`wheel::ListSurface`], and "now" always comes from the caller.

pub mod clock;
pub mod selector;
pub mod viewport;
pub mod wheel;

pub use clock::{Clock, FixedClock, SystemClock};
pub use selector::{Column, SelectionChanged, TimeSelector};
pub use viewport::ScrollViewport;
pub use wheel::WheelConfig;

/// Minute labels used when the config does not provide any.
/// The trailing "00" is intentional data, do not dedupe it: callers observe indices.
pub const DEFAULT_MINUTES: [&str; 5] = ["00", "15", "30", "45", "00"];

/// Zero-padded hour labels "00".."23"
pub fn hour_labels() -> Vec<String> {
    (0..24).map(|h| format!("{:02}", h)).collect()
}

pub fn default_minute_labels() -> Vec<String> {
    DEFAULT_MINUTES.iter().map(|m| m.to_string()).collect()
}

/// Position of `label` in `labels`, `None` when absent.
///
/// `None` sorts below every `Some(_)`, so `max(not_found, x) == x` and nothing
/// compares as lower than a missing floor.
pub fn index_of(labels: &[String], label: &str) -> Option<usize> {
    labels.iter().position(|l| l == label)
}

/// Smallest index whose numeric value is >= `minute`, or 0 when none qualifies.
///
/// Labels that don't parse as a number never qualify. The scan is linear; the
/// sequences are tiny.
pub fn minute_floor_index(minutes: &[String], minute: u32) -> usize {
    minutes
        .iter()
        .position(|m| m.trim().parse::<u32>().map(|v| v >= minute).unwrap_or(false))
        .unwrap_or(0)
}
