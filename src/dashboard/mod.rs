//! Dashboard module
//!
//! - State: immutable snapshots and the add/remove/select transitions
//! - Trend: chart series for the selected city
//! - Service: the event loop that owns the state and runs fetches

pub mod service;
pub mod state;
pub mod trend;

pub use service::{Dashboard, DashboardHandle};
pub use state::{AddRequest, DashboardState};
pub use trend::TemperatureTrend;
