//! The CO2 line chart.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::App;
use crate::data::DisplayUnit;

/// Legend name of the only dataset.
pub const SERIES_LABEL: &str = "CO2 ppm";

/// Title of the y axis.
pub const Y_AXIS_TITLE: &str = "CO2 ppm";

/// Render the history as a line chart, newest reading at the right edge.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chart_state = &app.chart;
    let points = chart_state.points();
    let x_bounds = chart_state.x_bounds();
    let y_bounds = chart_state.y_bounds();

    let datasets = vec![Dataset::default()
        .name(SERIES_LABEL)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.series))
        .data(&points)];

    let axis_style = Style::default().fg(app.theme.axis);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(" CO2 history ", app.theme.header))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .title(chart_state.axis_title())
                .style(axis_style)
                .bounds(x_bounds)
                .labels(x_labels(x_bounds, chart_state.unit())),
        )
        .y_axis(
            Axis::default()
                .title(Y_AXIS_TITLE)
                .style(axis_style)
                .bounds(y_bounds)
                .labels(y_labels(y_bounds)),
        );

    frame.render_widget(chart, area);
}

/// Oldest, middle and newest tick labels for the x axis.
///
/// Labels that round to the same text are shown once.
pub fn x_labels(bounds: [f64; 2], unit: DisplayUnit) -> Vec<String> {
    let [min, max] = bounds;
    let mid = (min + max) / 2.0;
    let mut labels: Vec<String> = [min, mid, max]
        .iter()
        .map(|v| match unit {
            // Round before formatting; adding 0.0 turns -0.0 into 0.0
            DisplayUnit::Minutes => format!("{:.0}", v.round() + 0.0),
            DisplayUnit::Hours => format!("{:.1}", (v * 10.0).round() / 10.0 + 0.0),
        })
        .collect();
    labels.dedup();
    labels
}

/// Low, middle and high tick labels for the y axis.
pub fn y_labels(bounds: [f64; 2]) -> Vec<String> {
    let [min, max] = bounds;
    let mid = (min + max) / 2.0;
    [min, mid, max].iter().map(|v| format!("{:.0}", v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_labels_minutes() {
        assert_eq!(x_labels([-10.0, 0.0], DisplayUnit::Minutes), vec!["-10", "-5", "0"]);
    }

    #[test]
    fn test_x_labels_short_span_has_no_negative_zero() {
        assert_eq!(x_labels([-1.0, 0.0], DisplayUnit::Minutes), vec!["-1", "0"]);
        assert_eq!(x_labels([-0.4, 0.0], DisplayUnit::Minutes), vec!["0"]);
        assert_eq!(x_labels([-3.0, 0.0], DisplayUnit::Minutes), vec!["-3", "-2", "0"]);
        assert_eq!(x_labels([-0.04, 0.0], DisplayUnit::Hours), vec!["0.0"]);
    }

    #[test]
    fn test_x_labels_hours() {
        assert_eq!(x_labels([-4.0, 0.0], DisplayUnit::Hours), vec!["-4.0", "-2.0", "0.0"]);
    }

    #[test]
    fn test_y_labels() {
        assert_eq!(y_labels([400.0, 800.0]), vec!["400", "600", "800"]);
    }
}
