//! Temperature trend chart data for the selected city

use serde::Serialize;

use crate::models::TrackedCity;

/// High/low series of one city's day summaries, ready for a line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureTrend {
    pub city: String,
    pub labels: Vec<String>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
}

impl TemperatureTrend {
    #[must_use]
    pub fn from_city(city: &TrackedCity) -> Self {
        Self {
            city: city.name.clone(),
            labels: city.forecast.iter().map(|day| day.date.clone()).collect(),
            highs: city.forecast.iter().map(|day| day.high).collect(),
            lows: city.forecast.iter().map(|day| day.low).collect(),
        }
    }
}
