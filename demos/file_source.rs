//! Example: Charting a saved history file
//!
//! This example drives the library without the TUI: a `FileSource` feeds a
//! `ChartPoller`, and an `App` applies each refresh and prints the chart it
//! would draw.
//!
//! The file should contain the sensor's history as a JSON array of ppm
//! values, newest first, e.g. one saved with
//! `curl -o history.json http://192.168.4.1/history.json`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example file_source -- path/to/history.json
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use co2_chart::{AirQuality, App, Applied, ChartPoller, FileSource, Theme};

#[tokio::main]
async fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example file_source -- <path-to-history.json>");
        eprintln!();
        eprintln!("The file should contain a JSON array of ppm values, newest first:");
        eprintln!("  [812, 805, 799]");
        std::process::exit(1);
    });

    println!("Charting file: {}", path);
    println!("Edit the file to see the chart change. Press Ctrl+C to stop\n");

    let source = Arc::new(FileSource::new(&path));
    let poller = ChartPoller::new(source, Duration::from_secs(2));
    let mut app = App::new(poller.source().description(), Theme::dark());

    let (handle, mut updates) = poller.start();

    while let Some(outcome) = updates.recv().await {
        let seq = outcome.seq;
        match app.apply(outcome) {
            Applied::Rendered => {
                let chart = &app.chart;
                println!(
                    "Refresh {}: {} readings, x axis in {}",
                    seq,
                    chart.series().len(),
                    chart.axis_title()
                );
                if let Some(latest) = chart.series().latest() {
                    let rating = AirQuality::from_ppm(latest);
                    println!("  latest: {:.0} ppm ({})", latest, rating.label());
                }
                if let Some(stats) = chart.series().stats() {
                    println!(
                        "  min {:.0} / mean {:.0} / max {:.0}",
                        stats.min, stats.mean, stats.max
                    );
                }
                if let (Some(first), Some(last)) = (chart.labels().first(), chart.labels().last()) {
                    println!("  labels run from {} to {}", first, last);
                }
                println!();
            }
            Applied::Failed => {
                eprintln!(
                    "Refresh {} failed: {}",
                    seq,
                    app.load_error.as_deref().unwrap_or("unknown error")
                );
            }
            Applied::Stale => {}
        }
    }

    handle.stop();
}
