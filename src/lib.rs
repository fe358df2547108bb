//! `weatherboard` - multi-city weather dashboard
//!
//! This library provides the forecast client, the transformer that shapes a
//! provider payload into a per-city view, and the dashboard state with its
//! event loop and HTTP API.

pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod transform;
pub mod web;

// Re-export core types for public API
pub use client::{ForecastProvider, OpenWeatherMapClient};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardHandle, DashboardState, TemperatureTrend};
pub use error::DashboardError;
pub use models::{ConditionIcon, DayForecast, TrackedCity};
pub use transform::transform;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
