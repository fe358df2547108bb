//! Data models for the weather dashboard
//!
//! This module contains the domain models organized by concern:
//! - Forecast: OpenWeatherMap wire payload
//! - City: per-city view model shown on the dashboard
//! - Weather: condition icons and display helpers

pub mod city;
pub mod forecast;
pub mod weather;

// Re-export all public types for convenient access
pub use city::{CityCard, CurrentReading, DayForecast, TrackedCity};
pub use forecast::{CityInfo, ConditionDescriptor, ForecastEntry, ForecastResponse, MainReading};
pub use weather::{ConditionIcon, format_temperature};
