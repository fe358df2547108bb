//! Condition icon categories and temperature display helpers

use serde::{Deserialize, Serialize};

/// Icon category a condition label is displayed with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionIcon {
    Sun,
    #[default]
    Cloud,
    CloudRain,
}

impl ConditionIcon {
    /// Map a provider condition label to its icon. Unknown labels fall back
    /// to [`ConditionIcon::Cloud`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "clear" | "sun" => Self::Sun,
            "rain" | "drizzle" | "thunderstorm" | "cloud-rain" => Self::CloudRain,
            _ => Self::Cloud,
        }
    }

    /// Short symbol used in terminal output
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Cloud => "☁",
            Self::CloudRain => "🌧",
        }
    }
}

/// Format a temperature rounded to whole degrees with its unit.
///
/// Halves round up (-2.5 becomes -2) and small negatives show as 0, never -0.
#[must_use]
pub fn format_temperature(value: f64, unit: &str) -> String {
    let rounded = (value + 0.5).floor() + 0.0;
    format!("{rounded}{unit}")
}
