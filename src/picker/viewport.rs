//! Terminal implementation of [`ListSurface`]
//!
//! Offsets are measured in terminal rows. Key presses and mouse-wheel ticks
//! become drags; a drag that stays quiet for the settle delay is reported as
//! the end of momentum.

use std::time::{Duration, Instant};

use super::wheel::{ItemLayout, ListSurface, ScrollConfig};

/// How long a wheel must be left alone before it settles
pub const SETTLE_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct ScrollViewport {
    offset_y: f32,
    item_height: f32,
    len: usize,
    snap_interval: f32,
    bounces: bool,
    last_drag: Option<Instant>,
    target: Option<f32>,
    settle_delay: Duration,
}

impl ScrollViewport {
    pub fn new(item_height: f32, len: usize) -> Self {
        Self {
            offset_y: 0.0,
            item_height,
            len,
            snap_interval: item_height,
            bounces: false,
            last_drag: None,
            target: None,
            settle_delay: SETTLE_DELAY,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset_y
    }

    pub fn max_offset(&self) -> f32 {
        self.len.saturating_sub(1) as f32 * self.item_height
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.last_drag.is_some()
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Move the content by `delta` rows
    pub fn drag_by(&mut self, delta: f32, now: Instant) {
        self.target = None;
        let next = self.offset_y + delta;
        self.offset_y = if self.bounces {
            next
        } else {
            next.clamp(0.0, self.max_offset())
        };
        self.last_drag = Some(now);
    }

    /// Snapped offset once the drag has been quiet long enough
    pub fn momentum_end(&mut self, now: Instant) -> Option<f32> {
        let last = self.last_drag?;
        if now.saturating_duration_since(last) < self.settle_delay {
            return None;
        }
        self.finish_momentum()
    }

    /// End a pending drag right away
    pub fn finish_momentum(&mut self) -> Option<f32> {
        self.last_drag.take()?;
        if self.snap_interval > 0.0 {
            self.offset_y = (self.offset_y / self.snap_interval).round() * self.snap_interval;
        }
        Some(self.offset_y)
    }

    /// Step a running animation by one item. Returns true while animating.
    pub fn advance(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let diff = target - self.offset_y;
        if diff.abs() <= self.item_height {
            self.offset_y = target;
            self.target = None;
        } else {
            self.offset_y += self.item_height * diff.signum();
        }
        true
    }
}

impl ListSurface for ScrollViewport {
    fn scroll_to_index(&mut self, layout: ItemLayout, animated: bool) {
        tracing::trace!(index = layout.index, length = layout.length, animated, "scroll to item");
        if animated {
            self.target = Some(layout.offset);
        } else {
            self.offset_y = layout.offset;
            self.target = None;
        }
    }

    fn configure(&mut self, config: ScrollConfig) {
        self.snap_interval = config.snap_interval;
        self.bounces = config.bounces;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(index: usize) -> ItemLayout {
        ItemLayout {
            length: 1.0,
            offset: index as f32,
            index,
        }
    }

    #[test]
    fn test_drag_does_not_overscroll() {
        let start = Instant::now();
        let mut viewport = ScrollViewport::new(1.0, 5);
        viewport.drag_by(-3.0, start);
        assert_eq!(viewport.offset(), 0.0);
        viewport.drag_by(10.0, start);
        assert_eq!(viewport.offset(), 4.0);
    }

    #[test]
    fn test_momentum_end_waits_for_quiet_period() {
        let start = Instant::now();
        let mut viewport = ScrollViewport::new(1.0, 24);
        viewport.drag_by(2.0, start);

        assert_eq!(viewport.momentum_end(start + Duration::from_millis(100)), None);
        assert!(viewport.is_dragging());

        assert_eq!(viewport.momentum_end(start + SETTLE_DELAY), Some(2.0));
        assert!(!viewport.is_dragging());
        // Reported once
        assert_eq!(viewport.momentum_end(start + SETTLE_DELAY * 2), None);
    }

    #[test]
    fn test_finish_momentum_snaps_to_interval() {
        let mut viewport = ScrollViewport::new(2.0, 24);
        viewport.drag_by(3.4, Instant::now());
        assert_eq!(viewport.finish_momentum(), Some(4.0));
        assert_eq!(viewport.finish_momentum(), None);
    }

    #[test]
    fn test_animated_scroll_steps_toward_target() {
        let mut viewport = ScrollViewport::new(1.0, 24);
        viewport.scroll_to_index(layout(3), true);
        assert_eq!(viewport.offset(), 0.0);

        assert!(viewport.advance());
        assert_eq!(viewport.offset(), 1.0);
        viewport.advance();
        viewport.advance();
        assert_eq!(viewport.offset(), 3.0);
        assert!(!viewport.is_animating());
        assert!(!viewport.advance());
    }

    #[test]
    fn test_plain_scroll_jumps_and_cancels_animation() {
        let mut viewport = ScrollViewport::new(1.0, 24);
        viewport.scroll_to_index(layout(10), true);
        viewport.scroll_to_index(layout(4), false);
        assert_eq!(viewport.offset(), 4.0);
        assert!(!viewport.is_animating());
    }

    #[test]
    fn test_bounce_config_applied() {
        let mut viewport = ScrollViewport::new(1.0, 3);
        viewport.configure(ScrollConfig {
            snap_interval: 1.0,
            bounces: true,
        });
        viewport.drag_by(-2.0, Instant::now());
        assert_eq!(viewport.offset(), -2.0);
    }
}
