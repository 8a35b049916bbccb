//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::AirQuality;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color of the CO2 line.
    pub series: Color,
    /// Color for axes and their labels.
    pub axis: Color,
    /// Color for errors in the status bar.
    pub error: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for titles.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            // rgba(75, 192, 192), the teal used by the sensor's web page
            series: Color::Rgb(75, 192, 192),
            axis: Color::Gray,
            error: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            series: Color::Rgb(30, 130, 130),
            axis: Color::DarkGray,
            error: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for an air quality rating
    pub fn rating_style(&self, rating: AirQuality) -> Style {
        match rating {
            AirQuality::SensorError => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
            AirQuality::Terrible => {
                let (r, g, b) = rating.rgb();
                Style::default().fg(Color::Rgb(r, g, b)).add_modifier(Modifier::BOLD)
            }
            _ => {
                let (r, g, b) = rating.rgb();
                Style::default().fg(Color::Rgb(r, g, b))
            }
        }
    }
}
