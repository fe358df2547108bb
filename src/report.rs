//! One-shot report: fetch a set of cities concurrently and fold the
//! outcomes into a dashboard snapshot.

use futures::future::join_all;
use tracing::{info, warn};

use crate::client::ForecastProvider;
use crate::dashboard::{AddRequest, DashboardState};
use crate::transform::transform;

/// One line per submitted name that did not end up on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub input: String,
    pub message: String,
}

/// Fetch every named city and return the resulting snapshot together with
/// the names that were rejected or failed.
pub async fn build_report(
    provider: &dyn ForecastProvider,
    inputs: &[String],
    forecast_window: usize,
) -> (DashboardState, Vec<Rejection>) {
    let mut state = DashboardState::new();
    let mut rejections = Vec::new();
    let mut accepted = Vec::new();

    for input in inputs {
        match state.request_add(input) {
            AddRequest::Rejected(next) => {
                rejections.push(Rejection {
                    input: input.clone(),
                    message: next.error().unwrap_or_default().to_string(),
                });
                state = next;
            }
            AddRequest::Accepted { state: next, city } => {
                accepted.push(city);
                state = next;
            }
        }
    }

    info!("Fetching weather for {} cities", accepted.len());
    let results = join_all(accepted.iter().map(|city| async move {
        provider
            .fetch_forecast(city)
            .await
            .and_then(|response| transform(&response, forecast_window))
    }))
    .await;

    for (city, result) in accepted.into_iter().zip(results) {
        state = match result {
            Ok(tracked) => state.fetch_succeeded(tracked),
            Err(e) => {
                warn!("Fetching weather for '{}' failed: {}", city, e);
                let next = state.fetch_failed();
                rejections.push(Rejection {
                    input: city,
                    message: next.error().unwrap_or_default().to_string(),
                });
                next
            }
        };
    }

    (state, rejections)
}
