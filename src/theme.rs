//! Picker colors, with optional hex overrides from the config file

use ratatui::style::Color;

use crate::config::ThemeSettings;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Focused wheel, key hints, borders of the sheet
    pub highlight: Color,   // Band behind the centered row
    pub selected: Color,    // Selected label on the band
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Unselected labels
    pub inactive: Color,    // Borders of unfocused things
    pub warning: Color,     // Status messages
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            highlight: Color::Rgb(161, 181, 150), // #a1b596
            selected: Color::Rgb(0, 0, 0),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(170, 170, 170), // #aaa
            inactive: Color::Rgb(88, 91, 112),
            warning: Color::Rgb(250, 179, 135),
        }
    }
}

impl Theme {
    /// Defaults with whatever the config overrides
    pub fn load(settings: &ThemeSettings) -> Self {
        let mut theme = Self::default();

        let overrides = [
            (&settings.accent, &mut theme.accent, "accent"),
            (&settings.highlight, &mut theme.highlight, "highlight"),
            (&settings.text, &mut theme.text, "text"),
            (&settings.text_dim, &mut theme.text_dim, "text_dim"),
        ];

        for (value, slot, name) in overrides {
            let Some(value) = value else { continue };
            match Self::parse_hex_color(value) {
                Some(color) => *slot = color,
                None => tracing::warn!("Ignoring theme.{}: {:?} is not a hex color", name, value),
            }
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#a1b596"), Some(Color::Rgb(161, 181, 150)));
        assert_eq!(Theme::parse_hex_color("aaa"), Some(Color::Rgb(170, 170, 170)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_parse_hex_color_rejects_non_ascii() {
        // Six and three bytes long, but not six or three hex digits
        assert_eq!(Theme::parse_hex_color("aébcd"), None);
        assert_eq!(Theme::parse_hex_color("#éa"), None);

        let settings = ThemeSettings {
            highlight: Some("aébcd".to_string()),
            ..Default::default()
        };
        assert_eq!(Theme::load(&settings).highlight, Theme::default().highlight);
    }

    #[test]
    fn test_load_applies_valid_overrides_only() {
        let settings = ThemeSettings {
            highlight: Some("#000".to_string()),
            text: Some("not a color".to_string()),
            ..Default::default()
        };
        let theme = Theme::load(&settings);
        assert_eq!(theme.highlight, Color::Rgb(0, 0, 0));
        assert_eq!(theme.text, Theme::default().text);
    }
}
