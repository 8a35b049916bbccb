//! Data models for the CO2 history.
//!
//! ## Submodules
//!
//! - [`series`]: the fetched [`Series`], its [`DisplayUnit`] and the [`ChartState`]
//!   that reshapes it into chart labels
//! - [`rating`]: [`AirQuality`] rating of a single reading
//!
//! ## Data Flow
//!
//! ```text
//! history.json (JSON array, newest first)
//!        │
//!        ▼
//!     Series
//!        │
//!        ▼
//! ChartState::refresh()
//!        │
//!        ├──▶ DisplayUnit (Minutes | Hours, from length)
//!        │
//!        └──▶ labels: 0, -1, -2, ... (scaled by unit)
//! ```

pub mod rating;
pub mod series;

pub use rating::AirQuality;
pub use series::{ChartState, DisplayUnit, Reading, Series, SeriesStats, HOURS_THRESHOLD};
