use chrono::{NaiveTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::picker::wheel::ScrollPhase;
use crate::picker::{Clock, Column, ScrollViewport, SelectionChanged, TimeSelector};
use crate::sheet::{BottomSheet, SheetChange};

/// Status messages clear after this long
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Rows the sheet needs on top of the wheels (borders, title line, spacer)
const SHEET_CHROME_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Sheet,
    Help,
}

pub struct App {
    pub popup: Popup,
    pub config: AppConfig,
    clock: Box<dyn Clock>,
    pub now: NaiveTime,

    pub hours: Vec<String>,
    pub minutes: Vec<String>,

    // What the home screen currently shows (and hands to the picker on open)
    pub selected_hour: String,
    pub selected_minute: String,

    pub sheet: BottomSheet,
    // Only alive while the sheet is shown
    pub picker: Option<TimeSelector<ScrollViewport>>,
    pub focus: Column,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    last_clock_refresh: Instant,
}

impl App {
    pub fn new(
        config: AppConfig,
        clock: Box<dyn Clock>,
        default_hour: Option<String>,
        default_minute: Option<String>,
    ) -> Self {
        let now = clock.now();

        // Unpadded on purpose, like the home screen always did; the picker
        // clamps an unknown label up to the current hour.
        let selected_hour = default_hour
            .or_else(|| config.default_hour.clone())
            .unwrap_or_else(|| now.hour().to_string());
        let selected_minute = default_minute.unwrap_or_else(|| config.default_minute.clone());

        let min_height = config.wheel.rows().saturating_add(SHEET_CHROME_ROWS);
        let sheet = BottomSheet::new(config.sheet.snap_percent, min_height);

        Self {
            popup: Popup::None,
            hours: config.hour_labels(),
            minutes: config.minutes.clone(),
            config,
            clock,
            now,
            selected_hour,
            selected_minute,
            sheet,
            picker: None,
            focus: Column::Hour,
            status_message: None,
            status_message_time: None,
            last_clock_refresh: Instant::now(),
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// The time the home screen holds
    pub fn selection(&self) -> SelectionChanged {
        SelectionChanged {
            hour: self.selected_hour.clone(),
            minute: self.selected_minute.clone(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle popups first
        match self.popup {
            Popup::Sheet => self.handle_sheet_key(key),
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
            }
            Popup::None => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('o') | KeyCode::Char(' ') | KeyCode::Enter => self.open_sheet(),
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,
            _ => {}
        }
    }

    fn handle_sheet_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_focused(-1.0, Instant::now()),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_focused(1.0, Instant::now()),
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.other();
            }
            // Commit whatever is still spinning, then close
            KeyCode::Enter => {
                self.finish_momentum();
                self.close_sheet();
            }
            // Pan down to close: a wheel still in motion is dropped
            KeyCode::Esc => self.close_sheet(),
            _ => {}
        }
    }

    /// Mouse-wheel ticks scroll the focused wheel, wherever the pointer is
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if !self.sheet.is_visible() {
            return;
        }
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll_focused(-1.0, Instant::now()),
            MouseEventKind::ScrollDown => self.scroll_focused(1.0, Instant::now()),
            _ => {}
        }
    }

    /// Drag the focused wheel by `items`
    fn scroll_focused(&mut self, items: f32, now: Instant) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        let item_height = picker.wheel(self.focus).config().item_height;
        picker.begin_drag(self.focus);
        picker
            .wheel_mut(self.focus)
            .surface_mut()
            .drag_by(items * item_height, now);
    }

    pub fn open_sheet(&mut self) {
        let Some(change) = self.sheet.present() else {
            return;
        };
        self.on_sheet_change(change);

        self.now = self.clock.now();
        self.last_clock_refresh = Instant::now();

        let item_height = self.config.wheel_config().item_height;
        self.picker = Some(TimeSelector::new(
            self.hours.clone(),
            self.minutes.clone(),
            &self.selected_hour,
            &self.selected_minute,
            self.now,
            self.config.wheel_config(),
            |_, len| ScrollViewport::new(item_height, len),
        ));
        self.focus = Column::Hour;
        self.popup = Popup::Sheet;
    }

    pub fn close_sheet(&mut self) {
        let Some(change) = self.sheet.dismiss() else {
            return;
        };
        self.on_sheet_change(change);
        self.picker = None;
        self.popup = Popup::None;
        self.set_status(format!("Picked {}:{}", self.selected_hour, self.selected_minute));
    }

    fn on_sheet_change(&self, change: SheetChange) {
        tracing::info!(index = change.index, "sheet changed");
    }

    /// Settle both wheels immediately if they are mid-drag
    fn finish_momentum(&mut self) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        let mut changes = Vec::new();
        for column in [Column::Hour, Column::Minute] {
            if picker.wheel(column).phase() != ScrollPhase::Scrolling {
                continue;
            }
            if let Some(offset) = picker.wheel_mut(column).surface_mut().finish_momentum() {
                changes.extend(picker.settle(column, offset));
            }
        }
        for change in changes {
            self.apply_selection(change);
        }
    }

    /// Periodic work: animations, settling, clock refresh, status expiry
    pub fn tick(&mut self, now: Instant) {
        let refresh_due = now.saturating_duration_since(self.last_clock_refresh)
            >= Duration::from_secs(self.config.clock_refresh_secs);
        if refresh_due {
            self.now = self.clock.now();
            self.last_clock_refresh = now;
        }

        let mut changes = Vec::new();
        let mut moved_by_clock = false;
        if let Some(picker) = self.picker.as_mut() {
            for column in [Column::Hour, Column::Minute] {
                let viewport = picker.wheel_mut(column).surface_mut();
                viewport.advance();
                if let Some(offset) = viewport.momentum_end(now) {
                    changes.extend(picker.settle(column, offset));
                }
            }

            if refresh_due {
                if let Some(change) = picker.set_now(self.now) {
                    changes.push(change);
                    moved_by_clock = true;
                }
            }
        }

        for change in changes {
            self.apply_selection(change);
        }
        if moved_by_clock {
            self.set_status(format!(
                "Moved to {}:{}, the earlier time has passed",
                self.selected_hour, self.selected_minute
            ));
        }

        if let Some(shown) = self.status_message_time {
            if shown.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    fn apply_selection(&mut self, change: SelectionChanged) {
        tracing::info!("Time changed: {} {}", change.hour, change.minute);
        self.selected_hour = change.hour;
        self.selected_minute = change.minute;
    }
}
