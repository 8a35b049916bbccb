//! Application state and refresh handling.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::json;
use tokio::sync::mpsc;

use crate::data::ChartState;
use crate::poller::{PollerHandle, RefreshOutcome};
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// What [`App::apply`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The chart now shows the outcome's series.
    Rendered,
    /// A newer refresh was already applied; the outcome was dropped.
    Stale,
    /// The fetch failed; the chart was left untouched.
    Failed,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    source_description: String,
    pub chart: ChartState,
    pub last_updated: Option<Instant>,
    pub load_error: Option<String>,
    /// Sequence number of the newest outcome shown, 0 before the first.
    applied_seq: u64,

    poller: Option<PollerHandle>,
    updates: Option<mpsc::UnboundedReceiver<RefreshOutcome>>,

    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create an app with an empty chart.
    pub fn new(source_description: impl Into<String>, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            source_description: source_description.into(),
            chart: ChartState::new(),
            last_updated: None,
            load_error: None,
            applied_seq: 0,
            poller: None,
            updates: None,
            theme,
            status_message: None,
        }
    }

    /// Connect a started poller. Its outcomes are picked up by
    /// [`App::poll_updates`].
    pub fn attach(&mut self, handle: PollerHandle, updates: mpsc::UnboundedReceiver<RefreshOutcome>) {
        self.poller = Some(handle);
        self.updates = Some(updates);
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Apply every outcome that has arrived since the last call.
    ///
    /// Returns true if the chart changed.
    pub fn poll_updates(&mut self) -> bool {
        let mut pending = Vec::new();
        if let Some(updates) = self.updates.as_mut() {
            while let Ok(outcome) = updates.try_recv() {
                pending.push(outcome);
            }
        }

        let mut changed = false;
        for outcome in pending {
            changed |= self.apply(outcome) == Applied::Rendered;
        }
        changed
    }

    /// Fold one refresh outcome into the app.
    ///
    /// Successful outcomes older than the one on screen are discarded, so the
    /// newest started refresh wins whatever order responses arrive in. A
    /// failure only records the error; the chart keeps its previous contents.
    pub fn apply(&mut self, outcome: RefreshOutcome) -> Applied {
        match outcome.result {
            Ok(series) => {
                if outcome.seq <= self.applied_seq {
                    tracing::debug!(
                        seq = outcome.seq,
                        applied = self.applied_seq,
                        "discarding stale refresh"
                    );
                    return Applied::Stale;
                }
                self.chart.refresh(series);
                self.applied_seq = outcome.seq;
                self.last_updated = Some(Instant::now());
                self.load_error = None;
                Applied::Rendered
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
                Applied::Failed
            }
        }
    }

    /// Ask the poller for an immediate refresh.
    pub fn request_refresh(&mut self) {
        let requested = self.poller.as_ref().is_some_and(|poller| poller.refresh_now());
        if requested {
            self.set_status_message("Refreshing...".to_string());
        } else {
            self.set_status_message("Poller is not running".to_string());
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit and stop polling.
    pub fn quit(&mut self) {
        self.running = false;
        if let Some(poller) = &self.poller {
            poller.stop();
        }
    }

    /// Export the chart currently on screen to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.last_updated.is_none() {
            anyhow::bail!("No data to export");
        }
        export_chart(&self.chart, path)
    }
}

/// Write the chart's unit, axis title, labels and data as pretty JSON.
pub fn export_chart(chart: &ChartState, path: &Path) -> Result<()> {
    let export = json!({
        "unit": chart.unit(),
        "axis_title": chart.axis_title(),
        "labels": chart.labels(),
        "data": chart.series(),
    });

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DisplayUnit, Series};
    use crate::poller::tests::ScriptedSource;
    use crate::poller::ChartPoller;
    use crate::source::FetchError;
    use std::sync::Arc;

    fn app() -> App {
        App::new("test", Theme::dark())
    }

    fn ok(seq: u64, readings: Vec<f64>) -> RefreshOutcome {
        RefreshOutcome {
            seq,
            result: Ok(Series::new(readings)),
        }
    }

    fn failed(seq: u64) -> RefreshOutcome {
        RefreshOutcome {
            seq,
            result: Err(FetchError::Timeout),
        }
    }

    #[test]
    fn test_apply_success_updates_chart() {
        let mut app = app();
        assert_eq!(app.apply(ok(1, vec![400.0, 405.0, 410.0])), Applied::Rendered);
        assert_eq!(app.chart.labels(), &[0.0, -1.0, -2.0]);
        assert_eq!(app.chart.axis_title(), "Minutes");
        assert!(app.last_updated.is_some());
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_failure_leaves_chart_unchanged() {
        let mut app = app();
        app.apply(ok(1, vec![500.0; 150]));
        let before = app.chart.clone();
        let updated = app.last_updated;

        assert_eq!(app.apply(failed(2)), Applied::Failed);
        assert_eq!(app.chart, before);
        assert_eq!(app.last_updated, updated);
        assert_eq!(app.load_error.as_deref(), Some("Request timed out"));
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut app = app();
        app.apply(failed(1));
        assert!(app.load_error.is_some());
        assert_eq!(app.chart, ChartState::new());

        app.apply(ok(2, vec![420.0]));
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut app = app();
        assert_eq!(app.apply(ok(2, vec![500.0; 130])), Applied::Rendered);
        let newest = app.chart.clone();

        assert_eq!(app.apply(ok(1, vec![400.0])), Applied::Stale);
        assert_eq!(app.chart, newest);
        assert_eq!(app.chart.unit(), DisplayUnit::Hours);
    }

    #[test]
    fn test_failed_newer_refresh_does_not_block_older_success() {
        let mut app = app();
        app.apply(failed(2));
        assert_eq!(app.apply(ok(1, vec![400.0])), Applied::Rendered);
        assert_eq!(app.apply(ok(3, vec![410.0, 400.0])), Applied::Rendered);
        assert_eq!(app.chart.series().len(), 2);
    }

    #[test]
    fn test_identical_refreshes_are_idempotent() {
        let mut app = app();
        app.apply(ok(1, vec![400.0, 401.0]));
        let first = app.chart.clone();
        app.apply(ok(2, vec![400.0, 401.0]));
        assert_eq!(app.chart, first);
    }

    #[test]
    fn test_request_refresh_without_poller() {
        let mut app = app();
        app.request_refresh();
        assert_eq!(app.get_status_message(), Some("Poller is not running"));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.quit();
        assert!(!app.running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_updates_from_attached_poller() {
        let source = Arc::new(ScriptedSource::new(vec![Some(vec![400.0, 410.0])]));
        let (handle, rx) = ChartPoller::new(source, Duration::from_secs(60)).start();
        let mut app = app();
        app.attach(handle, rx);

        // Let the first fetch run.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(app.poll_updates());
        assert_eq!(app.chart.series().readings(), &[400.0, 410.0]);
        assert!(!app.poll_updates());

        app.request_refresh();
        assert_eq!(app.get_status_message(), Some("Refreshing..."));
        app.quit();
    }

    #[test]
    fn test_export_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        let mut app = app();
        assert!(app.export_state(&path).is_err());

        app.apply(ok(1, vec![400.0, 405.0]));
        app.export_state(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["unit"], "minutes");
        assert_eq!(value["axis_title"], "Minutes");
        assert_eq!(value["labels"], json!([0.0, -1.0]));
        assert_eq!(value["data"], json!([400.0, 405.0]));
    }
}
