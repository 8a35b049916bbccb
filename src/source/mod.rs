//! History source abstraction.
//!
//! A [`HistorySource`] produces the full current [`Series`] on demand. The
//! poller does not care where it comes from: the sensor's HTTP endpoint in
//! normal operation, or a saved `history.json` file.

mod error;
mod file;
mod http;

pub use error::FetchError;
pub use file::FileSource;
pub use http::HttpSource;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::data::Series;

/// Trait for fetching the CO2 history from various sources.
///
/// # Example
///
/// ```
/// use co2_chart::{FileSource, HistorySource};
///
/// # tokio_test::block_on(async {
/// let source = FileSource::new("history.json");
/// if let Ok(series) = source.fetch().await {
///     println!("Got {} readings", series.len());
/// }
/// # });
/// ```
#[async_trait]
pub trait HistorySource: Send + Sync + Debug {
    /// Fetch the whole current series.
    ///
    /// Each call returns a complete snapshot; nothing is merged with earlier
    /// results.
    async fn fetch(&self) -> Result<Series, FetchError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
