//! Common UI components around the chart.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::AirQuality;

/// Render the header bar with the latest reading.
///
/// Displays: latest ppm and its rating, min/mean/max, reading count, source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.chart.series();

    let Some(latest) = series.latest() else {
        let status = if app.last_updated.is_some() { "No readings" } else { "Loading..." };
        let line = Line::from(vec![
            Span::styled(" CO2 MONITOR ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("| {} | {}", status, app.source_description())),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let rating = AirQuality::from_ppm(latest);
    let rating_style = app.theme.rating_style(rating);

    let mut spans = vec![
        Span::styled(" ● ", rating_style),
        Span::styled("CO2 ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
    ];

    if rating == AirQuality::SensorError {
        spans.push(Span::styled("sensor error", rating_style));
    } else {
        spans.push(Span::styled(
            format!("{:.0} ppm", latest),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(rating.label(), rating_style));
    }

    if let Some(stats) = series.stats() {
        spans.push(Span::raw(format!(
            " │ min {:.0} mean {:.0} max {:.0}",
            stats.min, stats.mean, stats.max
        )));
    }

    spans.push(Span::raw(format!(
        " │ {} readings │ {}",
        series.len(),
        app.source_description()
    )));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows: time since last update, the last refresh error, available controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "r:refresh e:export ?:help q:quit";

    let (status, style) = match (&app.load_error, app.last_updated) {
        (Some(err), Some(updated)) => (
            format!(
                " Error: {} | Showing data from {:.0}s ago | {}",
                err,
                updated.elapsed().as_secs_f64(),
                controls
            ),
            Style::default().fg(app.theme.error),
        ),
        (Some(err), None) => (
            format!(" Error: {} | q:quit r:retry", err),
            Style::default().fg(app.theme.error),
        ),
        (None, Some(updated)) => (
            format!(
                " Updated {:.1}s ago | {}",
                updated.elapsed().as_secs_f64(),
                controls
            ),
            Style::default().add_modifier(Modifier::DIM),
        ),
        (None, None) => (
            " Loading... | q:quit".to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the chart.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export chart to JSON"),
        Line::from("  ?         Toggle this help"),
        Line::from("  q / Esc   Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Air quality",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        rating_line(app, "  < 500     ", AirQuality::Excellent),
        rating_line(app, "  < 800     ", AirQuality::Good),
        rating_line(app, "  < 1000    ", AirQuality::Okay),
        rating_line(app, "  < 1400    ", AirQuality::Bad),
        rating_line(app, "  ≥ 1400    ", AirQuality::Terrible),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 36u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

fn rating_line(app: &App, range: &'static str, rating: AirQuality) -> Line<'static> {
    Line::from(vec![
        Span::raw(range),
        Span::styled(rating.label(), app.theme.rating_style(rating)),
    ])
}
