//! A single scrollable column with centered-selection semantics
//!
//! The wheel does not scroll anything itself. It relies on a [`ListSurface`]
//! with a fixed per-item height: every offset maps to an index without
//! measuring layout, so rows of varying height are not supported.

/// Item height and number of simultaneously visible items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelConfig {
    pub item_height: f32,
    /// Odd, so exactly one item sits in the middle
    pub visible_items: usize,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            item_height: 1.0,
            visible_items: 5,
        }
    }
}

/// Fixed layout metadata for one item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLayout {
    pub length: f32,
    pub offset: f32,
    pub index: usize,
}

/// Scroll behaviour a surface must apply to a wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    pub snap_interval: f32,
    pub bounces: bool,
}

/// The list-rendering capability a wheel needs from its host.
///
/// Implementors must lay items out at `index * item_height` and report the
/// vertical offset when momentum ends.
pub trait ListSurface {
    fn scroll_to_index(&mut self, layout: ItemLayout, animated: bool);

    fn configure(&mut self, _config: ScrollConfig) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Scrolling,
}

/// One visible row of a wheel
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<'a> {
    /// `None` for the padding above the first / below the last item
    pub label: Option<&'a str>,
    pub selected: bool,
    pub centered: bool,
    /// Below the minimum index, shown but not selectable
    pub disabled: bool,
}

pub struct Wheel<S> {
    labels: Vec<String>,
    selected: Option<usize>,
    min_index: usize,
    config: WheelConfig,
    phase: ScrollPhase,
    surface: S,
}

impl<S: ListSurface> Wheel<S> {
    pub fn new(labels: Vec<String>, selected: Option<usize>, config: WheelConfig, mut surface: S) -> Self {
        surface.configure(ScrollConfig {
            snap_interval: config.item_height,
            bounces: false,
        });

        let mut wheel = Self {
            labels,
            selected,
            min_index: 0,
            config,
            phase: ScrollPhase::Idle,
            surface,
        };
        wheel.sync_scroll();
        wheel
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: Option<usize>) -> Option<&str> {
        index.and_then(|i| self.labels.get(i)).map(String::as_str)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[cfg(test)]
    pub fn min_index(&self) -> usize {
        self.min_index
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn config(&self) -> WheelConfig {
        self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn set_min_index(&mut self, min_index: usize) {
        self.min_index = min_index;
    }

    /// Number of empty item slots above the first and below the last item
    pub fn padding_items(&self) -> usize {
        self.config.visible_items / 2
    }

    pub fn padding(&self) -> f32 {
        self.padding_items() as f32 * self.config.item_height
    }

    pub fn item_layout(&self, index: usize) -> ItemLayout {
        ItemLayout {
            length: self.config.item_height,
            offset: self.config.item_height * index as f32,
            index,
        }
    }

    /// User started dragging
    pub fn begin_drag(&mut self) {
        self.phase = ScrollPhase::Scrolling;
    }

    /// Momentum ended at `offset_y`. Returns the settled index, once.
    ///
    /// Settles that arrive while idle come from programmatic scrolls and are ignored.
    pub fn settle(&mut self, offset_y: f32) -> Option<usize> {
        if self.phase != ScrollPhase::Scrolling {
            return None;
        }
        self.phase = ScrollPhase::Idle;

        if self.labels.is_empty() {
            return None;
        }

        let raw = (offset_y / self.config.item_height).round() as i64;
        let index = if raw < self.min_index as i64 {
            self.surface.scroll_to_index(self.item_layout(self.min_index), true);
            self.min_index
        } else {
            (raw as usize).min(self.labels.len() - 1)
        };

        tracing::debug!(offset_y, index, min_index = self.min_index, "wheel settled");
        Some(index)
    }

    /// Selection pushed from outside. Re-centers without reporting a settle.
    pub fn set_selected(&mut self, index: Option<usize>) {
        if self.selected == index {
            return;
        }
        self.selected = index;
        self.sync_scroll();
    }

    fn sync_scroll(&mut self) {
        if let Some(index) = self.selected.filter(|i| *i < self.labels.len()) {
            self.surface.scroll_to_index(self.item_layout(index), false);
        }
    }

    /// Rows on screen for a content offset, top to bottom
    pub fn visible_slots(&self, offset_y: f32) -> Vec<Slot<'_>> {
        let center = (offset_y / self.config.item_height).round() as i64;
        let half = self.padding_items() as i64;

        (0..self.config.visible_items as i64)
            .map(|row| {
                let index = center - half + row;
                let label = usize::try_from(index)
                    .ok()
                    .and_then(|i| self.labels.get(i))
                    .map(String::as_str);
                Slot {
                    label,
                    selected: index >= 0 && Some(index as usize) == self.selected,
                    centered: row == half,
                    disabled: index >= 0 && (index as usize) < self.min_index,
                }
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every scroll request
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub scrolls: Vec<(usize, bool)>,
        pub config: Option<ScrollConfig>,
    }

    impl ListSurface for RecordingSurface {
        fn scroll_to_index(&mut self, layout: ItemLayout, animated: bool) {
            self.scrolls.push((layout.index, animated));
        }

        fn configure(&mut self, config: ScrollConfig) {
            self.config = Some(config);
        }
    }

    fn hours_wheel(selected: Option<usize>, item_height: f32) -> Wheel<RecordingSurface> {
        let config = WheelConfig {
            item_height,
            visible_items: 5,
        };
        Wheel::new(crate::picker::hour_labels(), selected, config, RecordingSurface::default())
    }

    #[test]
    fn test_new_centers_initial_selection() {
        let wheel = hours_wheel(Some(14), 40.0);
        assert_eq!(wheel.surface().scrolls, vec![(14, false)]);
        assert_eq!(
            wheel.surface().config,
            Some(ScrollConfig {
                snap_interval: 40.0,
                bounces: false
            })
        );
    }

    #[test]
    fn test_out_of_range_selection_skips_centering() {
        let wheel = hours_wheel(None, 40.0);
        assert!(wheel.surface().scrolls.is_empty());

        let mut wheel = hours_wheel(Some(2), 40.0);
        wheel.set_selected(Some(99));
        assert_eq!(wheel.selected(), Some(99));
        assert_eq!(wheel.surface().scrolls, vec![(2, false)]);
    }

    #[test]
    fn test_settle_reports_exact_index_for_every_item() {
        let mut wheel = hours_wheel(Some(0), 40.0);
        for i in 0..24 {
            wheel.begin_drag();
            assert_eq!(wheel.settle(i as f32 * 40.0), Some(i));
        }
    }

    #[test]
    fn test_settle_rounds_to_nearest_item() {
        let mut wheel = hours_wheel(Some(0), 40.0);
        wheel.begin_drag();
        assert_eq!(wheel.settle(59.0), Some(1));
        wheel.begin_drag();
        assert_eq!(wheel.settle(61.0), Some(2));
    }

    #[test]
    fn test_settle_below_min_index_clamps_and_corrects() {
        let mut wheel = hours_wheel(Some(14), 40.0);
        wheel.set_min_index(14);
        wheel.begin_drag();
        assert_eq!(wheel.settle(3.0 * 40.0), Some(14));
        assert_eq!(wheel.surface().scrolls.last(), Some(&(14, true)));
    }

    #[test]
    fn test_settle_negative_offset_clamps_to_zero() {
        let mut wheel = hours_wheel(Some(3), 40.0);
        wheel.begin_drag();
        assert_eq!(wheel.settle(-80.0), Some(0));
        assert_eq!(wheel.surface().scrolls.last(), Some(&(0, true)));
    }

    #[test]
    fn test_settle_past_last_item_clamps() {
        let mut wheel = hours_wheel(Some(0), 40.0);
        wheel.begin_drag();
        assert_eq!(wheel.settle(40.0 * 30.0), Some(23));
        // No corrective scroll for overscroll at the bottom
        assert_eq!(wheel.surface().scrolls, vec![(0, false)]);
    }

    #[test]
    fn test_settle_only_once_per_drag() {
        let mut wheel = hours_wheel(Some(0), 1.0);
        wheel.begin_drag();
        assert_eq!(wheel.phase(), ScrollPhase::Scrolling);
        assert_eq!(wheel.settle(5.0), Some(5));
        assert_eq!(wheel.phase(), ScrollPhase::Idle);
        assert_eq!(wheel.settle(6.0), None);
    }

    #[test]
    fn test_setting_same_index_does_not_scroll() {
        let mut wheel = hours_wheel(Some(5), 1.0);
        wheel.set_selected(Some(5));
        assert_eq!(wheel.surface().scrolls, vec![(5, false)]);

        wheel.set_selected(Some(6));
        assert_eq!(wheel.surface().scrolls, vec![(5, false), (6, false)]);
    }

    #[test]
    fn test_padding_and_layout() {
        let wheel = hours_wheel(Some(0), 40.0);
        assert_eq!(wheel.padding_items(), 2);
        assert_eq!(wheel.padding(), 80.0);
        assert_eq!(
            wheel.item_layout(3),
            ItemLayout {
                length: 40.0,
                offset: 120.0,
                index: 3
            }
        );
    }

    #[test]
    fn test_visible_slots_pad_first_item() {
        let wheel = hours_wheel(Some(0), 1.0);
        let slots = wheel.visible_slots(0.0);
        let labels: Vec<_> = slots.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![None, None, Some("00"), Some("01"), Some("02")]);
        assert!(slots[2].centered);
        assert!(slots[2].selected);
        assert!(!slots[3].selected);
    }

    #[test]
    fn test_visible_slots_mark_past_items() {
        let mut wheel = hours_wheel(Some(14), 1.0);
        wheel.set_min_index(14);
        let disabled: Vec<_> = wheel.visible_slots(14.0).iter().map(|s| s.disabled).collect();
        assert_eq!(disabled, vec![true, true, false, false, false]);
    }

    #[test]
    fn test_visible_slots_pad_last_item() {
        let wheel = hours_wheel(Some(23), 1.0);
        let labels: Vec<_> = wheel.visible_slots(23.0).iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![Some("21"), Some("22"), Some("23"), None, None]);
    }
}
