//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `CO2CHART_*` environment variables. Command-line flags are applied on top
//! by the binary.
//!
//! ```toml
//! url = "http://192.168.4.1/history.json"
//! interval_secs = 60
//! timeout_secs = 10
//! log_file = "co2-chart.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// History endpoint of the sensor when connected to its access point.
pub const DEFAULT_URL: &str = "http://192.168.4.1/history.json";

/// Prefix of the environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "CO2CHART";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// URL of the history endpoint.
    pub url: String,
    /// Seconds between scheduled refreshes.
    pub interval_secs: u64,
    /// Seconds before a request is abandoned.
    pub timeout_secs: u64,
    /// Where to write logs while the TUI is running.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from defaults, `path` (if given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("url", DEFAULT_URL)?
            .set_default("interval_secs", 60)?
            .set_default("timeout_secs", 10)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings =
            builder.add_source(env.try_parsing(true)).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the poller cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            bail!("url must not be empty");
        }
        if self.interval_secs == 0 {
            bail!("interval_secs must be at least 1");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file() -> NamedTempFile {
        tempfile::Builder::new().suffix(".toml").tempfile().unwrap()
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_from(None, env(&[])).unwrap();
        assert_eq!(settings.url, DEFAULT_URL);
        assert_eq!(settings.interval(), Duration::from_secs(60));
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = toml_file();
        writeln!(file, "url = \"http://localhost:8080/history.json\"").unwrap();
        writeln!(file, "interval_secs = 5").unwrap();
        writeln!(file, "log_file = \"chart.log\"").unwrap();

        let settings = Settings::load_from(Some(file.path()), env(&[])).unwrap();
        assert_eq!(settings.url, "http://localhost:8080/history.json");
        assert_eq!(settings.interval_secs, 5);
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.log_file, Some(PathBuf::from("chart.log")));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = toml_file();
        writeln!(file, "interval_secs = 5").unwrap();

        let settings = Settings::load_from(
            Some(file.path()),
            env(&[
                ("CO2CHART_INTERVAL_SECS", "15"),
                ("CO2CHART_URL", "http://sensor/history.json"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.interval_secs, 15);
        assert_eq!(settings.url, "http://sensor/history.json");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = Settings::load_from(None, env(&[("CO2CHART_INTERVAL_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("interval_secs"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Settings::load_from(Some(Path::new("/nonexistent/co2-chart.toml")), env(&[]));
        assert!(result.is_err());
    }
}
