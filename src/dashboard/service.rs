//! Dashboard event loop
//!
//! A single task owns the [`DashboardState`]. User actions and fetch
//! completions arrive as events; after each transition the new snapshot is
//! published on a watch channel. Fetches run as independent tasks and may
//! complete in any order.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::state::{AddRequest, DashboardState};
use crate::client::ForecastProvider;
use crate::models::TrackedCity;
use crate::transform::transform;
use crate::{DashboardError, Result};

const COMMAND_BUFFER: usize = 64;

enum Command {
    Add {
        input: String,
        reply: oneshot::Sender<Result<String>>,
    },
    Remove(String),
    Select(String),
    ClearSelection,
}

struct FetchOutcome {
    city: String,
    result: Result<TrackedCity>,
}

/// Cloneable handle used to drive the dashboard and read its snapshots
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Arc<DashboardState>>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Add { input, .. } => f.debug_tuple("Add").field(input).finish(),
            Command::Remove(name) => f.debug_tuple("Remove").field(name).finish(),
            Command::Select(name) => f.debug_tuple("Select").field(name).finish(),
            Command::ClearSelection => f.write_str("ClearSelection"),
        }
    }
}

impl DashboardHandle {
    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<DashboardState> {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every new snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardState>> {
        self.snapshots.clone()
    }

    /// Submit a city name. Returns the trimmed name whose fetch was
    /// started, or a validation error for blank input.
    pub async fn add_city(&self, input: &str) -> Result<String> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Add {
            input: input.to_string(),
            reply,
        })
        .await?;
        response.await.map_err(|_| DashboardError::Stopped)?
    }

    /// Remove every tracked city with this name
    pub async fn remove_city(&self, name: &str) -> Result<()> {
        self.send(Command::Remove(name.to_string())).await
    }

    /// Select a city for the temperature trend
    pub async fn select_city(&self, name: &str) -> Result<()> {
        self.send(Command::Select(name.to_string())).await
    }

    pub async fn clear_selection(&self) -> Result<()> {
        self.send(Command::ClearSelection).await
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| DashboardError::Stopped)
    }
}

/// Owner of the dashboard state
pub struct Dashboard {
    provider: Arc<dyn ForecastProvider>,
    forecast_window: usize,
    state: Arc<DashboardState>,
    snapshots: watch::Sender<Arc<DashboardState>>,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
}

impl Dashboard {
    /// Start the event loop. It runs until every [`DashboardHandle`] is dropped.
    pub fn spawn(
        provider: Arc<dyn ForecastProvider>,
        forecast_window: usize,
    ) -> (DashboardHandle, JoinHandle<()>) {
        let state = Arc::new(DashboardState::new());
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshots_tx, snapshots_rx) = watch::channel(Arc::clone(&state));
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();

        let dashboard = Self {
            provider,
            forecast_window,
            state,
            snapshots: snapshots_tx,
            fetch_tx,
        };
        let task = tokio::spawn(dashboard.run(commands_rx, fetch_rx));

        let handle = DashboardHandle {
            commands: commands_tx,
            snapshots: snapshots_rx,
        };
        (handle, task)
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut fetches: mpsc::UnboundedReceiver<FetchOutcome>,
    ) {
        info!("Dashboard event loop started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(outcome) = fetches.recv() => self.handle_fetch(outcome),
            }
        }
        info!("Dashboard event loop stopped");
    }

    fn handle_command(&mut self, command: Command) {
        debug!(?command, "Handling dashboard command");
        match command {
            Command::Add { input, reply } => match self.state.request_add(&input) {
                AddRequest::Rejected(next) => {
                    let message = next.error().unwrap_or_default().to_string();
                    self.publish(next);
                    let _ = reply.send(Err(DashboardError::validation(message)));
                }
                AddRequest::Accepted { state, city } => {
                    self.publish(state);
                    self.start_fetch(city.clone());
                    let _ = reply.send(Ok(city));
                }
            },
            Command::Remove(name) => {
                let next = self.state.remove(&name);
                self.publish(next);
            }
            Command::Select(name) => {
                let next = self.state.select(&name);
                self.publish(next);
            }
            Command::ClearSelection => {
                let next = self.state.clear_selection();
                self.publish(next);
            }
        }
    }

    fn start_fetch(&self, city: String) {
        let provider = Arc::clone(&self.provider);
        let results = self.fetch_tx.clone();
        let window = self.forecast_window;

        tokio::spawn(async move {
            let result = provider
                .fetch_forecast(&city)
                .await
                .and_then(|response| transform(&response, window));
            // the loop is gone when nobody holds a handle anymore
            let _ = results.send(FetchOutcome { city, result });
        });
    }

    fn handle_fetch(&mut self, outcome: FetchOutcome) {
        let next = match outcome.result {
            Ok(city) => {
                info!(
                    "Tracking '{}' ({} forecast days)",
                    city.name,
                    city.forecast.len()
                );
                self.state.fetch_succeeded(city)
            }
            Err(e) => {
                warn!("Fetching weather for '{}' failed: {}", outcome.city, e);
                self.state.fetch_failed()
            }
        };
        self.publish(next);
    }

    fn publish(&mut self, next: DashboardState) {
        if *self.state == next {
            return;
        }
        self.state = Arc::new(next);
        self.snapshots.send_replace(Arc::clone(&self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EMPTY_CITY_MESSAGE, FETCH_FAILED_MESSAGE};
    use crate::models::{CityInfo, ConditionDescriptor, ForecastEntry, ForecastResponse, MainReading};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    struct StaticProvider {
        forecasts: HashMap<String, ForecastResponse>,
    }

    #[async_trait]
    impl ForecastProvider for StaticProvider {
        async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse> {
            self.forecasts
                .get(city)
                .cloned()
                .ok_or_else(|| DashboardError::api("HTTP 404 Not Found"))
        }
    }

    fn forecast(name: &str) -> ForecastResponse {
        let list = (0..5)
            .map(|i| ForecastEntry {
                dt: 1_705_276_800 + i * 6 * 3600,
                main: MainReading {
                    temp: 10.0,
                    temp_min: 8.0,
                    temp_max: 12.0,
                },
                weather: vec![ConditionDescriptor {
                    main: "Clear".to_string(),
                    description: String::new(),
                }],
            })
            .collect();
        ForecastResponse {
            list,
            city: CityInfo {
                name: name.to_string(),
                country: None,
                timezone: 0,
            },
        }
    }

    fn spawn_with(cities: &[&str]) -> DashboardHandle {
        let provider = StaticProvider {
            forecasts: cities
                .iter()
                .map(|name| ((*name).to_string(), forecast(name)))
                .collect(),
        };
        let (handle, _task) = Dashboard::spawn(Arc::new(provider), 12);
        handle
    }

    async fn wait_until<F>(handle: &DashboardHandle, predicate: F) -> Arc<DashboardState>
    where
        F: Fn(&DashboardState) -> bool,
    {
        let mut snapshots = handle.subscribe();
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let current = snapshots.borrow_and_update().clone();
                if predicate(&current) {
                    return current;
                }
                snapshots.changed().await.unwrap();
            }
        })
        .await
        .expect("dashboard did not reach expected state")
    }

    #[tokio::test]
    async fn test_add_city_fetches_and_tracks() {
        let handle = spawn_with(&["Oslo"]);

        let accepted = handle.add_city("  Oslo ").await.unwrap();
        assert_eq!(accepted, "Oslo");

        let state = wait_until(&handle, |s| s.cities().len() == 1).await;
        assert_eq!(state.cities()[0].name, "Oslo");
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_blank_name_sets_validation_error() {
        let handle = spawn_with(&[]);

        let result = handle.add_city("   ").await;
        assert!(matches!(result, Err(DashboardError::Validation { .. })));

        let state = handle.snapshot();
        assert!(state.cities().is_empty());
        assert_eq!(state.error(), Some(EMPTY_CITY_MESSAGE));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_existing_cities() {
        let handle = spawn_with(&["Oslo"]);
        handle.add_city("Oslo").await.unwrap();
        wait_until(&handle, |s| s.cities().len() == 1).await;

        handle.add_city("Atlantis").await.unwrap();
        let state = wait_until(&handle, |s| s.error().is_some()).await;

        assert_eq!(state.error(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(state.cities().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_and_selection() {
        let handle = spawn_with(&["Oslo", "Rome"]);
        handle.add_city("Oslo").await.unwrap();
        handle.add_city("Rome").await.unwrap();
        wait_until(&handle, |s| s.cities().len() == 2).await;

        handle.select_city("Rome").await.unwrap();
        wait_until(&handle, |s| s.selected_name() == Some("Rome")).await;

        handle.remove_city("Rome").await.unwrap();
        let state = wait_until(&handle, |s| s.cities().len() == 1).await;
        assert!(state.selected_name().is_none());
        assert_eq!(state.cities()[0].name, "Oslo");
    }

    #[tokio::test]
    async fn test_handle_reports_stopped_loop() {
        let provider = StaticProvider {
            forecasts: HashMap::new(),
        };
        let (handle, task) = Dashboard::spawn(Arc::new(provider), 12);
        task.abort();
        let _ = task.await;

        assert!(matches!(
            handle.remove_city("Oslo").await,
            Err(DashboardError::Stopped)
        ));
    }
}
