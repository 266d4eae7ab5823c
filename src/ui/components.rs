//! Reusable UI component helpers

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::picker::wheel::Slot;
use crate::theme::Theme;

/// One wheel, drawn from the slots the model says are on screen.
/// The highlight band is painted by the caller so it can span both wheels.
pub struct WheelColumn<'a> {
    pub slots: Vec<Slot<'a>>,
    pub item_height: u16,
    pub focused: bool,
    pub theme: &'a Theme,
}

impl Widget for WheelColumn<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, slot) in self.slots.iter().enumerate() {
            let top = u16::try_from(row)
                .unwrap_or(u16::MAX)
                .saturating_mul(self.item_height)
                .saturating_add(area.y);
            if top >= area.bottom() {
                break;
            }
            let rows = self.item_height.min(area.bottom() - top);
            let label_y = top + rows / 2;

            if slot.centered && self.focused && area.width >= 2 {
                let marker = Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD);
                buf.set_string(area.x, label_y, "›", marker);
                buf.set_string(area.right() - 1, label_y, "‹", marker);
            }

            let Some(label) = slot.label else { continue };

            let style = match (slot.selected, slot.centered) {
                (true, true) => Style::default().fg(self.theme.selected).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(self.theme.text).add_modifier(Modifier::BOLD),
                _ if slot.disabled => Style::default().fg(self.theme.inactive).add_modifier(Modifier::CROSSED_OUT),
                _ => Style::default().fg(self.theme.text_dim),
            };

            let width = label.chars().count() as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            buf.set_stringn(x, label_y, label, area.width as usize, style);
        }
    }
}
