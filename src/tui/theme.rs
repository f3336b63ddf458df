//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeChoice;
use crate::scoring::Tier;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tier colors (traffic light pattern)
    pub tier_low: Color,
    pub tier_medium: Color,
    pub tier_high: Color,

    // Gauge colors
    pub bar_empty: Color,

    // Brand accents
    pub accent: Color,
    pub accent_alt: Color,

    // Styles
    pub title_style: Style,
    pub header_style: Style,
    pub field_focused: Style,

    // General colors
    pub text: Color,
    pub muted: Color,
    pub error: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,

    // Training banner colors
    pub banner_bg: Color,
    pub banner_fg: Color,
    pub banner_key: Color,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            tier_low: Color::Red,
            tier_medium: Color::Yellow,
            tier_high: Color::Green,
            bar_empty: Color::DarkGray,
            accent: Color::Rgb(255, 107, 53),
            accent_alt: Color::Rgb(96, 140, 255),
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            field_focused: Style::new().fg(Color::Rgb(255, 107, 53)).bold(),
            text: Color::White,
            muted: Color::Gray,
            error: Color::Red,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            banner_bg: Color::Rgb(229, 90, 43),
            banner_fg: Color::White,
            banner_key: Color::Yellow,
        }
    }

    /// Light theme palette
    pub fn light() -> Self {
        Self {
            tier_low: Color::Rgb(200, 30, 30),
            tier_medium: Color::Rgb(204, 102, 0),
            tier_high: Color::Rgb(22, 130, 60),
            bar_empty: Color::Indexed(250),
            accent: Color::Rgb(229, 90, 43),
            accent_alt: Color::Rgb(30, 64, 175),
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            field_focused: Style::new().fg(Color::Rgb(229, 90, 43)).bold(),
            text: Color::Black,
            muted: Color::Indexed(242),
            error: Color::Rgb(200, 30, 30),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Rgb(30, 64, 175),
            flash_success: Color::Rgb(22, 130, 60),
            flash_error: Color::Rgb(200, 30, 30),
            popup_border: Color::Rgb(30, 64, 175),
            popup_title: Style::new().fg(Color::Rgb(30, 64, 175)).bold(),
            banner_bg: Color::Rgb(255, 107, 53),
            banner_fg: Color::White,
            banner_key: Color::Black,
        }
    }

    /// Color for a maturity tier
    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Low => self.tier_low,
            Tier::Medium => self.tier_medium,
            Tier::High => self.tier_high,
        }
    }
}

/// Pick the palette for the configured theme. `Auto` asks the terminal for its
/// background luma and falls back to dark when it can't tell.
pub fn resolve_theme(choice: ThemeChoice) -> ThemeColors {
    match choice {
        ThemeChoice::Dark => ThemeColors::dark(),
        ThemeChoice::Light => ThemeColors::light(),
        ThemeChoice::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                tracing::debug!("Could not detect terminal background: {:?}", e);
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_colors_differ() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.tier_color(Tier::Low), Color::Red);
        assert_eq!(theme.tier_color(Tier::Medium), Color::Yellow);
        assert_eq!(theme.tier_color(Tier::High), Color::Green);
    }

    #[test]
    fn test_explicit_choice_skips_detection() {
        assert_eq!(resolve_theme(ThemeChoice::Light).text, Color::Black);
        assert_eq!(resolve_theme(ThemeChoice::Dark).text, Color::White);
    }
}
