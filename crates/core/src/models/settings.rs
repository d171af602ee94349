use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Dashboard configuration.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Scheme and host of the backend. Empty means same origin.
    pub base_url: String,

    /// Path of the volume series endpoint.
    pub volume_endpoint: String,

    /// HTTP timeout in seconds (native targets only).
    pub request_timeout_secs: u64,

    /// Expand daily series into contiguous days, zero-filling gaps.
    pub fill_missing_dates: bool,

    /// Longest accepted query range, in days.
    pub max_range_days: i64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            volume_endpoint: "/operations/volume-data".to_string(),
            request_timeout_secs: 30,
            fill_missing_dates: true,
            max_range_days: 3650,
        }
    }
}

impl DashboardSettings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Full URL of the volume endpoint, without query string.
    pub fn volume_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.volume_endpoint
        )
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.volume_endpoint.starts_with('/') {
            return Err(CoreError::Configuration(format!(
                "volume_endpoint '{}' must start with '/'",
                self.volume_endpoint
            )));
        }
        if self.max_range_days < 1 {
            return Err(CoreError::Configuration(format!(
                "max_range_days must be positive, got {}",
                self.max_range_days
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Configuration(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
