//! Dashboard state snapshots and their transitions
//!
//! Every operation takes a snapshot by reference and returns the next one;
//! nothing is mutated in place.

use serde::Serialize;

use super::trend::TemperatureTrend;
use crate::error::{EMPTY_CITY_MESSAGE, FETCH_FAILED_MESSAGE};
use crate::models::TrackedCity;

/// What the dashboard shows at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    cities: Vec<TrackedCity>,
    selected: Option<String>,
    error: Option<String>,
}

/// Outcome of submitting a city name
#[derive(Debug, Clone, PartialEq)]
pub enum AddRequest {
    /// Blank input; the state carries the validation error and an unchanged list
    Rejected(DashboardState),
    /// A fetch for `city` should be started
    Accepted { state: DashboardState, city: String },
}

impl DashboardState {
    /// Empty dashboard
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracked cities in the order they were added
    #[must_use]
    pub fn cities(&self) -> &[TrackedCity] {
        &self.cities
    }

    /// Name of the selected city, if any
    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected city, resolved against the tracked list
    #[must_use]
    pub fn selected(&self) -> Option<&TrackedCity> {
        let name = self.selected.as_deref()?;
        self.cities.iter().find(|city| city.name == name)
    }

    /// User-visible error message, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit a city name. Blank input is rejected with a validation error
    /// and leaves the list untouched; otherwise the previous error is
    /// cleared and the trimmed name is handed back for fetching.
    #[must_use]
    pub fn request_add(&self, input: &str) -> AddRequest {
        let city = input.trim();
        if city.is_empty() {
            return AddRequest::Rejected(Self {
                error: Some(EMPTY_CITY_MESSAGE.to_string()),
                ..self.clone()
            });
        }

        AddRequest::Accepted {
            state: Self {
                error: None,
                ..self.clone()
            },
            city: city.to_string(),
        }
    }

    /// Append a successfully fetched city
    #[must_use]
    pub fn fetch_succeeded(&self, city: TrackedCity) -> Self {
        let mut cities = self.cities.clone();
        cities.push(city);
        Self {
            cities,
            ..self.clone()
        }
    }

    /// Record a failed fetch; the list is left as it was
    #[must_use]
    pub fn fetch_failed(&self) -> Self {
        Self {
            error: Some(FETCH_FAILED_MESSAGE.to_string()),
            ..self.clone()
        }
    }

    /// Remove every city with this name. Clears the selection when it
    /// pointed at the removed city.
    #[must_use]
    pub fn remove(&self, name: &str) -> Self {
        let cities = self
            .cities
            .iter()
            .filter(|city| city.name != name)
            .cloned()
            .collect();
        let selected = self.selected.clone().filter(|selected| selected != name);

        Self {
            cities,
            selected,
            error: self.error.clone(),
        }
    }

    /// Select a tracked city for the temperature trend. Unknown names leave
    /// the state unchanged.
    #[must_use]
    pub fn select(&self, name: &str) -> Self {
        if !self.cities.iter().any(|city| city.name == name) {
            return self.clone();
        }
        Self {
            selected: Some(name.to_string()),
            ..self.clone()
        }
    }

    /// Drop the current selection
    #[must_use]
    pub fn clear_selection(&self) -> Self {
        Self {
            selected: None,
            ..self.clone()
        }
    }

    /// Trend series of the selected city
    #[must_use]
    pub fn temperature_trend(&self) -> Option<TemperatureTrend> {
        self.selected().map(TemperatureTrend::from_city)
    }
}
