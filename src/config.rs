//! Configuration management for the weather dashboard
//!
//! Handles loading configuration from files and environment variables,
//! and validates the resulting settings.

use crate::DashboardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Forecast API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Dashboard behaviour
    #[serde(default)]
    pub dashboard: DashboardSettings,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast API configuration settings
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL of the forecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Unit system passed to the API (metric, imperial, standard)
    #[serde(default = "default_weather_units")]
    pub units: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

// Keeps the API key out of debug output and logs.
impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Dashboard behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Number of entries after the current one considered for day summaries
    #[serde(default = "default_forecast_window")]
    pub forecast_window: usize,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Optional directory with a prebuilt frontend
    pub static_dir: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_units() -> String {
    "metric".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_forecast_window() -> usize {
    12
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            units: default_weather_units(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            forecast_window: default_forecast_window(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            dashboard: DashboardSettings::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERBOARD_WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("WEATHERBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherboard").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.units.is_empty() {
            self.weather.units = default_weather_units();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.dashboard.forecast_window == 0 {
            self.dashboard.forecast_window = default_forecast_window();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The API key is optional at load time so `--help`-style commands work
    /// without one; the forecast client refuses to start without it.
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.trim().is_empty() {
                return Err(DashboardError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() < 8 {
                return Err(DashboardError::config(
                    "Weather API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }

            if api_key.len() > 100 {
                return Err(DashboardError::config(
                    "Weather API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(DashboardError::config("Weather API timeout cannot exceed 300 seconds").into());
        }

        // The 5 day / 3 hour endpoint never returns more than 40 entries.
        if self.dashboard.forecast_window > 40 {
            return Err(DashboardError::config("Forecast window cannot exceed 40 entries").into());
        }

        if self.server.port == 0 {
            return Err(DashboardError::config("Server port must be non-zero").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_units = ["metric", "imperial", "standard"];
        if !valid_units.contains(&self.weather.units.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid units '{}'. Must be one of: {}",
                self.weather.units,
                valid_units.join(", ")
            ))
            .into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(DashboardError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Symbol for the configured unit system, used when printing temperatures
    #[must_use]
    pub fn temperature_unit(&self) -> &'static str {
        match self.weather.units.as_str() {
            "imperial" => "°F",
            "standard" => "K",
            _ => "°C",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.dashboard.forecast_window, 12);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.weather.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case("", false)]
    #[case("short", false)]
    #[case("valid_api_key_123", true)]
    fn test_api_key_validation(#[case] key: &str, #[case] valid: bool) {
        let mut config = DashboardConfig::default();
        config.weather.api_key = Some(key.to_string());
        assert_eq!(config.validate_api_key().is_ok(), valid);
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_units() {
        let mut config = DashboardConfig::default();
        config.weather.units = "kelvin".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid units"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = DashboardConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = DashboardConfig::default();
        config.dashboard.forecast_window = 41;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = DashboardConfig::default();
        config.weather.units = String::new();
        config.dashboard.forecast_window = 0;
        config.logging.format = String::new();

        config.apply_defaults();

        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.dashboard.forecast_window, 12);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "weatherboard-config-test-{}.toml",
            std::process::id()
        ));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(
                file,
                "[weather]\napi_key = \"file_api_key_123\"\nunits = \"imperial\"\n\n[server]\nport = 9090"
            )
            .unwrap();
        }

        let config = DashboardConfig::load_from_path(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("file_api_key_123"));
        assert_eq!(config.weather.units, "imperial");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.temperature_unit(), "°F");
        assert_eq!(config.dashboard.forecast_window, 12);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = DashboardConfig::default();
        config.weather.api_key = Some("super_secret_key".to_string());
        let rendered = format!("{:?}", config.weather);
        assert!(!rendered.contains("super_secret_key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = DashboardConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weatherboard"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
