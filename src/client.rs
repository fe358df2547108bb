//! Forecast API client for OpenWeatherMap
//!
//! Fetches the 5 day / 3 hour forecast for a city name. Requests are not
//! retried; any failure is reported to the caller once.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::ForecastResponse;
use crate::{DashboardError, Result};

/// Source of forecast payloads
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch the raw forecast for a city name
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse>;
}

/// OpenWeatherMap HTTP client
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    client: Client,
    base_url: String,
    units: String,
    api_key: String,
}

impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    /// Create a new client. Fails when no API key is configured.
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                DashboardError::config(
                    "Weather API key is required. Set weather.api_key or WEATHERBOARD_WEATHER__API_KEY.",
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("weatherboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units.clone(),
            api_key,
        })
    }

    /// Request URL without the API key, safe to log
    fn forecast_path(&self, city: &str) -> String {
        format!(
            "{}/forecast?q={}&units={}",
            self.base_url,
            urlencoding::encode(city),
            self.units
        )
    }

    fn forecast_url(&self, city: &str) -> String {
        format!(
            "{}&appid={}",
            self.forecast_path(city),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse> {
        let start_time = Instant::now();
        debug!(url = %self.forecast_path(city), "Requesting forecast");

        let response = self
            .client
            .get(self.forecast_url(city))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!("Forecast request for '{}' failed: {}", city, e);
                DashboardError::api(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Forecast API answered {} for '{}'", status, city);
            return Err(DashboardError::api(format!(
                "forecast request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let forecast: ForecastResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            warn!("Failed to parse forecast for '{}': {}", city, e);
            DashboardError::api(format!("invalid forecast payload: {e}"))
        })?;

        info!(
            "Retrieved {} forecast entries for '{}' in {:.3}s",
            forecast.list.len(),
            city,
            start_time.elapsed().as_secs_f64()
        );

        Ok(forecast)
    }
}
