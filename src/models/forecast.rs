//! OpenWeatherMap forecast payload
//!
//! Wire types for the 5 day / 3 hour forecast endpoint. Only the fields the
//! dashboard reads are modelled; everything else in the payload is ignored.

use serde::{Deserialize, Serialize};

/// Forecast response from the `/forecast` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Time-series entries, earliest first
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    /// City the forecast was resolved to
    pub city: CityInfo,
}

/// One forecast interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp (seconds, UTC) of the interval
    pub dt: i64,
    /// Temperature readings
    pub main: MainReading,
    /// Condition descriptors; the first one is the primary condition
    #[serde(default)]
    pub weather: Vec<ConditionDescriptor>,
}

impl ForecastEntry {
    /// Primary condition label of this entry (e.g. "Clouds")
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.weather.first().map(|w| w.main.as_str())
    }
}

/// Temperature block of an entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MainReading {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

/// Condition descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionDescriptor {
    /// Short label such as "Clear", "Clouds", "Rain"
    pub main: String,
    #[serde(default)]
    pub description: String,
}

/// City block of the response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityInfo {
    #[serde(default)]
    pub name: String,
    pub country: Option<String>,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i32,
}
