//! Per-city dashboard view model

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weather::{ConditionIcon, format_temperature};

/// Conditions at the first forecast interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReading {
    pub temperature: f64,
    pub high: f64,
    pub low: f64,
    /// Provider condition label, e.g. "Clouds"
    pub condition: String,
    pub icon: ConditionIcon,
}

/// Summary of one forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    /// Short weekday label in the city's local time, e.g. "Tue"
    pub date: String,
    pub high: f64,
    pub low: f64,
    pub condition: String,
    pub icon: ConditionIcon,
}

/// A city on the dashboard together with its forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedCity {
    /// City name as resolved by the provider
    pub name: String,
    pub country: Option<String>,
    pub current: CurrentReading,
    /// At most one entry per date label, in first-seen order
    pub forecast: Vec<DayForecast>,
    /// When the forecast was fetched
    pub fetched_at: DateTime<Utc>,
}

impl TrackedCity {
    /// Terminal card for this city using the given temperature unit symbol
    #[must_use]
    pub fn card<'a>(&'a self, unit: &'a str) -> CityCard<'a> {
        CityCard { city: self, unit }
    }
}

/// Printable card of a [`TrackedCity`]
#[derive(Debug)]
pub struct CityCard<'a> {
    city: &'a TrackedCity,
    unit: &'a str,
}

impl Display for CityCard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let city = self.city;
        let current = &city.current;

        match &city.country {
            Some(country) => writeln!(f, "{} ({country})", city.name)?,
            None => writeln!(f, "{}", city.name)?,
        }
        writeln!(
            f,
            "   {} {}",
            current.icon.symbol(),
            format_temperature(current.temperature, self.unit)
        )?;
        writeln!(f, "   Condition: {}", current.condition)?;
        writeln!(
            f,
            "   High: {} | Low: {}",
            format_temperature(current.high, self.unit),
            format_temperature(current.low, self.unit)
        )?;
        for day in &city.forecast {
            writeln!(
                f,
                "   {:<4} {} / {}",
                day.date,
                format_temperature(day.high, self.unit),
                format_temperature(day.low, self.unit)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_city() -> TrackedCity {
        TrackedCity {
            name: "Lisbon".to_string(),
            country: Some("PT".to_string()),
            current: CurrentReading {
                temperature: 21.6,
                high: 23.2,
                low: 18.7,
                condition: "Clear".to_string(),
                icon: ConditionIcon::Sun,
            },
            forecast: vec![
                DayForecast {
                    date: "Tue".to_string(),
                    high: 24.4,
                    low: 17.1,
                    condition: "Clouds".to_string(),
                    icon: ConditionIcon::Cloud,
                },
                DayForecast {
                    date: "Wed".to_string(),
                    high: 19.5,
                    low: 15.0,
                    condition: "Rain".to_string(),
                    icon: ConditionIcon::CloudRain,
                },
            ],
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_card_rendering() {
        let city = sample_city();
        let card = city.card("°C").to_string();

        assert!(card.starts_with("Lisbon (PT)\n"));
        assert!(card.contains("22°C"));
        assert!(card.contains("Condition: Clear"));
        assert!(card.contains("High: 23°C | Low: 19°C"));
        assert!(card.contains("Tue  24°C / 17°C"));
        assert!(card.contains("Wed  20°C / 15°C"));
    }

    #[test]
    fn test_city_serializes_for_api() {
        let city = sample_city();
        let value = serde_json::to_value(&city).unwrap();
        assert_eq!(value["name"], "Lisbon");
        assert_eq!(value["current"]["icon"], "sun");
        assert_eq!(value["forecast"][1]["icon"], "cloud-rain");
    }
}
