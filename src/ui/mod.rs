//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`chart`]: The CO2 line chart itself
//! - [`common`]: Header bar, status bar and help overlay
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Chart (chart::render)                │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod chart;
pub mod common;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal width for a usable chart.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height for a usable chart.
pub const MIN_HEIGHT: u16 = 10;

/// Draw one full frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Check for minimum terminal size
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(ratatui::style::Color::Yellow));
        let centered = Rect::new(
            0,
            (area.height / 2).saturating_sub(2),
            area.width,
            5u16.min(area.height),
        );
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(8),    // Chart
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    chart::render(frame, app, chunks[1]);
    common::render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;
    use crate::poller::RefreshOutcome;
    use crate::source::FetchError;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    fn app_with(readings: Vec<f64>) -> App {
        let mut app = App::new("http: test", Theme::dark());
        app.apply(RefreshOutcome {
            seq: 1,
            result: Ok(Series::new(readings)),
        });
        app
    }

    #[test]
    fn test_draw_before_first_refresh() {
        let app = App::new("http: test", Theme::dark());
        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("Loading..."));
        assert!(screen.contains("Minutes"));
    }

    #[test]
    fn test_draw_minutes_chart() {
        let app = app_with(vec![400.0, 405.0, 410.0]);
        let screen = render_to_string(&app, 100, 24);
        assert!(screen.contains("400 ppm"));
        assert!(screen.contains("excellent"));
        assert!(screen.contains("Minutes"));
        assert!(screen.contains("CO2 ppm"));
        assert!(screen.contains("3 readings"));
    }

    #[test]
    fn test_draw_hours_chart() {
        let app = app_with((0..150).map(|i| 900.0 - i as f64).collect());
        let screen = render_to_string(&app, 100, 24);
        assert!(screen.contains("Hours"));
        assert!(screen.contains("okay"));
    }

    #[test]
    fn test_draw_error_keeps_chart() {
        let mut app = app_with(vec![1500.0, 1450.0]);
        app.apply(RefreshOutcome {
            seq: 2,
            result: Err(FetchError::Status(503)),
        });
        let screen = render_to_string(&app, 120, 24);
        assert!(screen.contains("Error: Unexpected HTTP status 503"));
        assert!(screen.contains("1500 ppm"));
        assert!(screen.contains("terrible"));
    }

    #[test]
    fn test_draw_sensor_error_reading() {
        let app = app_with(vec![-1.0, 600.0]);
        let screen = render_to_string(&app, 100, 24);
        assert!(screen.contains("sensor error"));
    }

    #[test]
    fn test_draw_too_small() {
        let app = App::new("http: test", Theme::dark());
        let screen = render_to_string(&app, 30, 8);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_draw_help_overlay() {
        let mut app = app_with(vec![420.0]);
        app.toggle_help();
        let screen = render_to_string(&app, 80, 24);
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
