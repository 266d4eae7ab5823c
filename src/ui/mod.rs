mod components;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::picker::Column;
use crate::theme::Theme;
use components::WheelColumn;

/// Width of one wheel in columns
const WHEEL_WIDTH: u16 = 8;

// Loaded once from the config at startup
static THEME: OnceLock<Theme> = OnceLock::new();

pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialized");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn highlight() -> Color { theme().highlight }
fn inactive() -> Color { theme().inactive }
fn warning() -> Color { theme().warning }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(3),    // Home
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_info_line(f, app, chunks[0]);
    draw_home(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Sheet => draw_sheet(f, app),
        Popup::Help => draw_help_popup(f),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(warning())))
    } else {
        Line::from(vec![
            Span::styled("Now ", Style::default().fg(text_dim())),
            Span::styled(app.now.format("%H:%M").to_string(), Style::default().fg(text())),
        ])
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_home(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" wheeltime ", Style::default().fg(accent()).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Picked time", Style::default().fg(text_dim()))),
        Line::from(Span::styled(
            format!("{}:{}", app.selected_hour, app.selected_minute),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[ ", Style::default().fg(inactive())),
            Span::styled("Open", Style::default().fg(text()).add_modifier(Modifier::BOLD)),
            Span::styled(" ]", Style::default().fg(inactive())),
        ]),
    ];

    let home = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    f.render_widget(home, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.popup {
        Popup::Sheet => &[("↑↓", "scroll"), ("←→", "wheel"), ("Enter", "done"), ("Esc", "close")],
        Popup::Help => &[("Esc", "close help")],
        Popup::None => &[("o", "open"), ("?", "help"), ("q", "quit")],
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(inactive())));
        }
        spans.push(Span::styled(*key, Style::default().fg(accent())));
        spans.push(Span::styled(format!(" {}", action), Style::default().fg(text_dim())));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn draw_sheet(f: &mut Frame, app: &App) {
    let Some(picker) = app.picker.as_ref() else {
        return;
    };
    let sheet_area = app.sheet.area(f.area());
    f.render_widget(Clear, sheet_area);

    let block = Block::default()
        .title(Span::styled(" Pick a time ", Style::default().fg(accent()).add_modifier(Modifier::BOLD)))
        .title_alignment(Alignment::Center)
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent()));
    let inner = block.inner(sheet_area);
    f.render_widget(block, sheet_area);

    let hours = picker.wheel(Column::Hour);
    let item_height = hours.config().item_height as u16;
    let wheel_rows = u16::try_from(hours.config().visible_items)
        .unwrap_or(u16::MAX)
        .saturating_mul(item_height);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // Floor hint
            Constraint::Length(1),          // Spacer
            Constraint::Length(wheel_rows), // Wheels
            Constraint::Min(0),
        ])
        .split(inner);

    let hint = Line::from(vec![
        Span::styled("Not earlier than ", Style::default().fg(text_dim())),
        Span::styled(app.now.format("%H:%M").to_string(), Style::default().fg(text())),
    ]);
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(WHEEL_WIDTH),
            Constraint::Length(1),
            Constraint::Length(WHEEL_WIDTH),
            Constraint::Fill(1),
        ])
        .split(rows[2]);

    // Highlight band behind the centered row of both wheels
    let padding_rows = hours.padding() as u16;
    let band = Rect {
        x: columns[1].x,
        y: rows[2].y.saturating_add(padding_rows),
        width: columns[1].width + columns[2].width + columns[3].width,
        height: item_height,
    }
    .intersection(rows[2]);
    f.buffer_mut().set_style(band, Style::default().bg(highlight()));

    let colon_y = band.y + band.height / 2;
    if band.height > 0 && columns[2].width > 0 {
        f.buffer_mut().set_string(
            columns[2].x,
            colon_y,
            ":",
            Style::default().fg(theme().selected).add_modifier(Modifier::BOLD),
        );
    }

    for (column, area) in [(Column::Hour, columns[1]), (Column::Minute, columns[3])] {
        let wheel = picker.wheel(column);
        let widget = WheelColumn {
            slots: wheel.visible_slots(wheel.surface().offset()),
            item_height,
            focused: app.focus == column,
            theme: theme(),
        };
        f.render_widget(widget, area);
    }
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(accent()).add_modifier(Modifier::BOLD)))
    };
    let key = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(keys, Style::default().fg(accent())),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        section("═══ Home ═══"),
        key("  o/Space/Enter  ", "Open the time picker"),
        key("  ?/h            ", "This help"),
        key("  q/Ctrl-C       ", "Quit"),
        Line::from(""),
        section("═══ Picker ═══"),
        key("  ↑/↓ k/j        ", "Scroll the focused wheel (mouse wheel too)"),
        key("  ←/→ h/l Tab    ", "Switch between hour and minute"),
        key("  Enter          ", "Keep the time and close"),
        key("  Esc            ", "Close, dropping a wheel still in motion"),
        Line::from(""),
        section("═══ Rules ═══"),
        Line::from("  • Hours before the current hour snap back"),
        Line::from("  • On the current hour, past minutes snap back too"),
        Line::from(vec![
            Span::styled("  • Config: ", Style::default()),
            Span::styled("~/.config/wheeltime/config.toml", Style::default().fg(text_dim())),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" wheeltime Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::picker::FixedClock;
    use chrono::NaiveTime;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_sheet_shows_both_wheels() {
        let clock = FixedClock(NaiveTime::from_hms_opt(14, 20, 0).unwrap());
        let mut app = App::new(AppConfig::default(), Box::new(clock), None, None);
        app.open_sheet();

        let mut terminal = Terminal::new(TestBackend::new(40, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Pick a time"));
        assert!(text.contains("Not earlier than 14:20"));
        assert!(text.contains("14"));
        assert!(text.contains("30"));
        assert!(text.contains(":"));
    }

    #[test]
    fn test_home_shows_selection() {
        let clock = FixedClock(NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        let app = App::new(AppConfig::default(), Box::new(clock), Some("11".into()), Some("45".into()));

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("11:45"));
        assert!(text.contains("Now 09:05"));
    }
}
