//! Forecast transformer
//!
//! Turns a raw forecast payload into the dashboard view of a city: the first
//! entry becomes the current reading, the following entries (bounded by the
//! forecast window) are bucketed into one summary per weekday label.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::{
    ConditionIcon, CurrentReading, DayForecast, ForecastEntry, ForecastResponse, TrackedCity,
};
use crate::{DashboardError, Result};

/// Default number of entries after the current one: 3 days of 4 intervals
pub const DEFAULT_FORECAST_WINDOW: usize = 12;

/// Build the dashboard view of a city from a forecast payload.
///
/// Fails instead of returning a partial view when the payload has no
/// entries, lacks a city name, or contains an entry without a condition or
/// with an out-of-range timestamp.
pub fn transform(response: &ForecastResponse, forecast_window: usize) -> Result<TrackedCity> {
    let name = response.city.name.trim();
    if name.is_empty() {
        return Err(DashboardError::transform("forecast has no city name"));
    }

    let (first, rest) = response
        .list
        .split_first()
        .ok_or_else(|| DashboardError::transform("forecast list is empty"))?;

    let offset = FixedOffset::east_opt(response.city.timezone).ok_or_else(|| {
        DashboardError::transform(format!(
            "invalid timezone offset {}",
            response.city.timezone
        ))
    })?;

    let current = current_reading(first)?;
    let window = &rest[..rest.len().min(forecast_window)];
    let forecast = daily_summaries(window, offset)?;

    Ok(TrackedCity {
        name: name.to_string(),
        country: response.city.country.clone(),
        current,
        forecast,
        fetched_at: Utc::now(),
    })
}

fn current_reading(entry: &ForecastEntry) -> Result<CurrentReading> {
    let condition = entry_condition(entry)?;
    Ok(CurrentReading {
        temperature: entry.main.temp,
        high: entry.main.temp_max,
        low: entry.main.temp_min,
        icon: ConditionIcon::from_label(condition),
        condition: condition.to_string(),
    })
}

/// One summary per distinct date label, first occurrence wins.
fn daily_summaries(entries: &[ForecastEntry], offset: FixedOffset) -> Result<Vec<DayForecast>> {
    let mut seen = HashSet::new();
    let mut days = Vec::new();

    for entry in entries {
        let date = date_label(entry.dt, offset)?;
        let condition = entry_condition(entry)?;
        if !seen.insert(date.clone()) {
            continue;
        }
        days.push(DayForecast {
            date,
            high: entry.main.temp_max,
            low: entry.main.temp_min,
            icon: ConditionIcon::from_label(condition),
            condition: condition.to_string(),
        });
    }

    Ok(days)
}

fn entry_condition(entry: &ForecastEntry) -> Result<&str> {
    entry
        .condition()
        .ok_or_else(|| DashboardError::transform(format!("entry at {} has no condition", entry.dt)))
}

/// Short weekday label ("Mon") of a unix timestamp in the given offset
pub fn date_label(timestamp: i64, offset: FixedOffset) -> Result<String> {
    let utc = DateTime::<Utc>::from_timestamp(timestamp, 0)
        .ok_or_else(|| DashboardError::transform(format!("invalid timestamp {timestamp}")))?;
    Ok(utc.with_timezone(&offset).format("%a").to_string())
}
