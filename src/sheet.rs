//! Bottom sheet hosting the picker
//!
//! Anchored to the bottom of the terminal, one snap point, closed with Esc.

use ratatui::layout::Rect;

/// Visibility change notification: snap index 0 when shown, -1 when closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetChange {
    pub index: i32,
}

#[derive(Debug, Clone)]
pub struct BottomSheet {
    visible: bool,
    snap_percent: u16,
    min_height: u16,
}

impl BottomSheet {
    pub fn new(snap_percent: u16, min_height: u16) -> Self {
        Self {
            visible: false,
            snap_percent: snap_percent.clamp(1, 100),
            min_height,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn present(&mut self) -> Option<SheetChange> {
        if self.visible {
            return None;
        }
        self.visible = true;
        Some(SheetChange { index: 0 })
    }

    pub fn dismiss(&mut self) -> Option<SheetChange> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        Some(SheetChange { index: -1 })
    }

    /// Area covered by the sheet inside `area`
    pub fn area(&self, area: Rect) -> Rect {
        let snapped = (area.height as u32 * self.snap_percent as u32 / 100) as u16;
        let height = snapped.max(self.min_height).min(area.height);
        Rect {
            x: area.x,
            y: area.y + area.height - height,
            width: area.width,
            height,
        }
    }
}
