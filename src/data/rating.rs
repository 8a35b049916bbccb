//! Air quality rating of a single reading.
//!
//! Thresholds and colours match the ones the sensor firmware uses for its LED
//! matrix and status page.

use super::series::Reading;

/// Rating of a CO2 reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQuality {
    /// The sensor reported a failed read (negative ppm).
    SensorError,
    Excellent,
    Good,
    Okay,
    Bad,
    Terrible,
}

/// Upper bounds (exclusive) of each rating, in ascending order.
const THRESHOLDS: &[(f64, AirQuality)] = &[
    (500.0, AirQuality::Excellent),
    (800.0, AirQuality::Good),
    (1000.0, AirQuality::Okay),
    (1400.0, AirQuality::Bad),
];

impl AirQuality {
    /// Rate a reading in ppm.
    pub fn from_ppm(ppm: Reading) -> Self {
        if ppm < 0.0 {
            return AirQuality::SensorError;
        }
        THRESHOLDS
            .iter()
            .find(|(limit, _)| ppm < *limit)
            .map(|(_, rating)| *rating)
            .unwrap_or(AirQuality::Terrible)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AirQuality::SensorError => "sensor error",
            AirQuality::Excellent => "excellent",
            AirQuality::Good => "good",
            AirQuality::Okay => "okay",
            AirQuality::Bad => "bad",
            AirQuality::Terrible => "terrible",
        }
    }

    /// RGB colour of the rating.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            AirQuality::SensorError => (0x80, 0x80, 0x80),
            AirQuality::Excellent => (0x00, 0xC0, 0xF0),
            AirQuality::Good => (0x10, 0xD6, 0x53),
            AirQuality::Okay => (0xFF, 0xFD, 0x13),
            AirQuality::Bad => (0xFF, 0x6B, 0x0F),
            AirQuality::Terrible => (0xFF, 0x3C, 0x13),
        }
    }
}
