//! Error types and handling for the weather dashboard

use thiserror::Error;

/// Message shown for any failed fetch, whatever the underlying cause
pub const FETCH_FAILED_MESSAGE: &str =
    "There was an error fetching the weather data. Please try again.";

/// Message shown when the user submits a blank city name
pub const EMPTY_CITY_MESSAGE: &str = "City name cannot be empty.";

/// Main error type for the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Forecast API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Forecast payload could not be turned into a dashboard view
    #[error("Malformed forecast: {message}")]
    Transform { message: String },

    /// The dashboard event loop is no longer running
    #[error("Dashboard event loop has stopped")]
    Stopped,

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DashboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new transform error
    pub fn transform<S: Into<String>>(message: S) -> Self {
        Self::Transform {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Validation failures keep their own text; every fetch-side failure
    /// collapses to [`FETCH_FAILED_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Validation { message } => message.clone(),
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            DashboardError::Api { .. }
            | DashboardError::Transform { .. }
            | DashboardError::Stopped
            | DashboardError::Io { .. } => FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}
