//! HTTP history source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{FetchError, HistorySource};
use crate::data::Series;

/// Fetches the history with a `GET` request to a fixed URL.
///
/// The endpoint must answer with a JSON array of numbers, newest first.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
    description: String,
}

impl HttpSource {
    /// Create a source for `url`, failing requests after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let url = url.into();
        let client = Client::builder().timeout(timeout).build()?;
        let description = format!("http: {}", url);
        Ok(Self {
            client,
            url,
            description,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl HistorySource for HttpSource {
    async fn fetch(&self) -> Result<Series, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let series = serde_json::from_slice(&body)?;
        Ok(series)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
