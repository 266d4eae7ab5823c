//! Hour and minute wheels coupled by the "not earlier than now" rule

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use super::wheel::{ListSurface, Wheel, WheelConfig};
use super::{index_of, minute_floor_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Hour,
    Minute,
}

impl Column {
    pub fn other(self) -> Self {
        match self {
            Column::Hour => Column::Minute,
            Column::Minute => Column::Hour,
        }
    }
}

/// Labels reported after every settle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionChanged {
    pub hour: String,
    pub minute: String,
}

pub struct TimeSelector<S> {
    hours: Wheel<S>,
    minutes: Wheel<S>,
    current_hour_index: Option<usize>,
    current_minute_index: usize,
}

impl<S: ListSurface> TimeSelector<S> {
    /// Build the picker for `now`, never starting earlier than it.
    ///
    /// `make_surface` receives the column and its label count.
    pub fn new(
        hours: Vec<String>,
        minutes: Vec<String>,
        default_hour: &str,
        default_minute: &str,
        now: NaiveTime,
        config: WheelConfig,
        mut make_surface: impl FnMut(Column, usize) -> S,
    ) -> Self {
        let current_hour_index = index_of(&hours, &format!("{:02}", now.hour()));
        let current_minute_index = minute_floor_index(&minutes, now.minute());

        let hour_index = index_of(&hours, default_hour).max(current_hour_index);
        let default_minute_index = index_of(&minutes, default_minute);
        let minute_index = if hour_index == current_hour_index {
            default_minute_index.max(Some(current_minute_index))
        } else {
            default_minute_index
        };

        tracing::debug!(
            ?current_hour_index,
            current_minute_index,
            ?hour_index,
            ?minute_index,
            "time selector initialized"
        );

        let hour_surface = make_surface(Column::Hour, hours.len());
        let minute_surface = make_surface(Column::Minute, minutes.len());

        let mut selector = Self {
            hours: Wheel::new(hours, hour_index, config, hour_surface),
            minutes: Wheel::new(minutes, minute_index, config, minute_surface),
            current_hour_index,
            current_minute_index,
        };
        selector.sync_min_indices();
        selector
    }

    #[cfg(test)]
    pub fn current_hour_index(&self) -> Option<usize> {
        self.current_hour_index
    }

    #[cfg(test)]
    pub fn current_minute_index(&self) -> usize {
        self.current_minute_index
    }

    #[cfg(test)]
    pub fn hour_index(&self) -> Option<usize> {
        self.hours.selected()
    }

    #[cfg(test)]
    pub fn minute_index(&self) -> Option<usize> {
        self.minutes.selected()
    }

    pub fn wheel(&self, column: Column) -> &Wheel<S> {
        match column {
            Column::Hour => &self.hours,
            Column::Minute => &self.minutes,
        }
    }

    pub fn wheel_mut(&mut self, column: Column) -> &mut Wheel<S> {
        match column {
            Column::Hour => &mut self.hours,
            Column::Minute => &mut self.minutes,
        }
    }

    /// Lowest minute index allowed for the selected hour
    pub fn minute_min_index(&self) -> usize {
        if self.on_current_hour() {
            self.current_minute_index
        } else {
            0
        }
    }

    #[cfg(test)]
    /// Labels for the current selection
    pub fn selection(&self) -> SelectionChanged {
        self.report(self.hours.selected(), self.minutes.selected())
    }

    pub fn begin_drag(&mut self, column: Column) {
        self.wheel_mut(column).begin_drag();
    }

    /// Momentum ended on `column` at `offset_y`
    pub fn settle(&mut self, column: Column, offset_y: f32) -> Option<SelectionChanged> {
        match column {
            Column::Hour => self.hours.settle(offset_y).map(|i| self.on_hour_change(i)),
            Column::Minute => self.minutes.settle(offset_y).map(|i| self.on_minute_change(i)),
        }
    }

    pub fn on_hour_change(&mut self, index: usize) -> SelectionChanged {
        // Never earlier than the current hour
        let hour = Some(index).max(self.current_hour_index);
        self.hours.set_selected(hour);
        self.sync_min_indices();

        if self.on_current_hour() && self.minutes.selected() < Some(self.current_minute_index) {
            let minute = Some(self.current_minute_index);
            self.minutes.set_selected(minute);
            self.report(hour, minute)
        } else {
            self.report(hour, self.minutes.selected())
        }
    }

    pub fn on_minute_change(&mut self, index: usize) -> SelectionChanged {
        let index = if self.on_current_hour() && index < self.current_minute_index {
            self.current_minute_index
        } else {
            index
        };
        self.minutes.set_selected(Some(index));
        self.report(self.hours.selected(), Some(index))
    }

    /// Move the "now" floor. Returns a report only when the selection had to move up.
    pub fn set_now(&mut self, now: NaiveTime) -> Option<SelectionChanged> {
        self.current_hour_index = index_of(self.hours.labels(), &format!("{:02}", now.hour()));
        self.current_minute_index = minute_floor_index(self.minutes.labels(), now.minute());

        let before = (self.hours.selected(), self.minutes.selected());

        let hour = self.hours.selected().max(self.current_hour_index);
        self.hours.set_selected(hour);
        if self.on_current_hour() && self.minutes.selected() < Some(self.current_minute_index) {
            self.minutes.set_selected(Some(self.current_minute_index));
        }
        self.sync_min_indices();

        let after = (self.hours.selected(), self.minutes.selected());
        if before == after {
            return None;
        }
        tracing::info!(%now, "selection moved up to the current time");
        Some(self.report(after.0, after.1))
    }

    fn on_current_hour(&self) -> bool {
        self.hours.selected() == self.current_hour_index
    }

    fn sync_min_indices(&mut self) {
        self.hours.set_min_index(self.current_hour_index.unwrap_or(0));
        let minute_min = self.minute_min_index();
        self.minutes.set_min_index(minute_min);
    }

    fn report(&self, hour: Option<usize>, minute: Option<usize>) -> SelectionChanged {
        SelectionChanged {
            hour: label_or_empty(&self.hours, hour),
            minute: label_or_empty(&self.minutes, minute),
        }
    }
}

fn label_or_empty<S: ListSurface>(wheel: &Wheel<S>, index: Option<usize>) -> String {
    match wheel.label(index) {
        Some(label) => label.to_string(),
        None => {
            tracing::warn!(?index, "no label for selected index");
            String::new()
        }
    }
}
