//! # co2-chart
//!
//! A terminal live chart of a CO2 sensor's recent history.
//!
//! The sensor serves its last hours of readings as a JSON array at
//! `/history.json`, one value per minute, newest first. This crate polls that
//! endpoint on a fixed interval and draws the series as a line chart, with the
//! newest reading at the right edge and the time axis labelled in minutes or,
//! for more than two hours of data, in hours.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │ poller  │───▶│   app    │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (timer) │    │ (state)  │    │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource                     │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`poller`]**: [`ChartPoller`] runs a refresh at startup and on every
//!   interval tick, tagging each with a sequence number
//! - **[`source`]**: [`HistorySource`] trait with an HTTP and a file implementation
//! - **[`data`]**: [`Series`], [`DisplayUnit`] and [`ChartState`], which turns a
//!   series into chart labels, plus the [`AirQuality`] rating
//! - **[`app`]**: [`App`] applies refresh outcomes, discarding stale ones
//! - **[`ui`]**: ratatui rendering of the header, chart and status bar
//! - **[`settings`]**: [`Settings`] layered from defaults, a TOML file and the environment
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the sensor on its access point
//! co2-chart
//!
//! # Poll another host every 10 seconds
//! co2-chart --url http://co2.local/history.json --interval 10
//!
//! # Chart a saved history file
//! co2-chart --file history.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use co2_chart::{App, ChartPoller, HttpSource, Theme};
//!
//! # tokio_test::block_on(async {
//! let source = HttpSource::new("http://192.168.4.1/history.json", Duration::from_secs(10))?;
//! let poller = ChartPoller::new(Arc::new(source), Duration::from_secs(60));
//! let mut app = App::new(poller.source().description(), Theme::dark());
//!
//! let (handle, updates) = poller.start();
//! app.attach(handle, updates);
//! app.poll_updates();
//! # Ok::<_, co2_chart::FetchError>(())
//! # });
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod poller;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Applied};
pub use data::{AirQuality, ChartState, DisplayUnit, Reading, Series, SeriesStats};
pub use poller::{ChartPoller, PollerHandle, RefreshOutcome};
pub use settings::Settings;
pub use source::{FetchError, FileSource, HistorySource, HttpSource};
pub use ui::Theme;
