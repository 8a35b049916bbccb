//! Series model and its reshaping into chart-ready labels.

use serde::{Deserialize, Serialize};

/// Series longer than this are labelled in hours instead of minutes.
pub const HOURS_THRESHOLD: usize = 120;

/// Minutes per hour, used to scale labels in [`DisplayUnit::Hours`].
const MINUTES_PER_HOUR: f64 = 60.0;

/// A single CO2 concentration in ppm.
///
/// The sensor records `-1` while it cannot read, so negative values are
/// possible and kept as-is.
pub type Reading = f64;

/// The ordered readings returned by one fetch, newest first.
///
/// One position corresponds to one minute: index 0 is "now", index 1 is one
/// minute ago, and so on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<Reading>);

impl Series {
    pub fn new(readings: Vec<Reading>) -> Self {
        Self(readings)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.0
    }

    /// The newest reading, if any.
    pub fn latest(&self) -> Option<Reading> {
        self.0.first().copied()
    }

    /// Min/mean/max over the valid (non-negative) readings.
    pub fn stats(&self) -> Option<SeriesStats> {
        let valid: Vec<Reading> = self.0.iter().copied().filter(|r| *r >= 0.0).collect();
        if valid.is_empty() {
            return None;
        }

        let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
        let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = valid.iter().sum::<f64>() / valid.len() as f64;

        Some(SeriesStats { min, max, mean })
    }
}

impl From<Vec<Reading>> for Series {
    fn from(readings: Vec<Reading>) -> Self {
        Self(readings)
    }
}

/// Summary statistics of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: Reading,
    pub max: Reading,
    pub mean: Reading,
}

/// Time unit of the x axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Minutes,
    Hours,
}

impl DisplayUnit {
    /// Choose the unit for a series of `len` readings.
    pub fn for_len(len: usize) -> Self {
        if len > HOURS_THRESHOLD {
            DisplayUnit::Hours
        } else {
            DisplayUnit::Minutes
        }
    }

    /// Axis title shown for this unit.
    pub fn title(&self) -> &'static str {
        match self {
            DisplayUnit::Minutes => "Minutes",
            DisplayUnit::Hours => "Hours",
        }
    }

    /// Offset label of the reading at `index`, in this unit.
    pub fn label(&self, index: usize) -> f64 {
        // Subtract from zero so index 0 is 0.0, not -0.0.
        let minutes = 0.0 - index as f64;
        match self {
            DisplayUnit::Minutes => minutes,
            DisplayUnit::Hours => minutes / MINUTES_PER_HOUR,
        }
    }
}

/// Everything the chart widget draws.
///
/// Owned by [`App`](crate::App) and changed only through [`ChartState::refresh`].
/// `labels.len() == series.len()` holds after every refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    labels: Vec<f64>,
    series: Series,
    unit: DisplayUnit,
}

impl ChartState {
    /// An empty chart, labelled in minutes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the chart contents with a freshly fetched series.
    pub fn refresh(&mut self, series: Series) {
        let unit = DisplayUnit::for_len(series.len());
        self.labels = (0..series.len()).map(|i| unit.label(i)).collect();
        self.unit = unit;
        self.series = series;
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    pub fn axis_title(&self) -> &'static str {
        self.unit.title()
    }

    /// `(label, reading)` pairs ready for plotting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.labels.iter().copied().zip(self.series.readings().iter().copied()).collect()
    }

    /// X axis bounds. The newest reading sits at 0, the right edge.
    pub fn x_bounds(&self) -> [f64; 2] {
        match self.labels.last() {
            Some(&oldest) if oldest < 0.0 => [oldest, 0.0],
            _ => [-1.0, 0.0],
        }
    }

    /// Y axis bounds padded around the valid readings.
    pub fn y_bounds(&self) -> [f64; 2] {
        match self.series.stats() {
            Some(stats) => {
                let pad = ((stats.max - stats.min) * 0.1).max(10.0);
                [(stats.min - pad).max(0.0), stats.max + pad]
            }
            None => [0.0, 1000.0],
        }
    }
}
