//! Application settings record.
//!
//! # Responsibility
//! - Define the single settings object and its documented defaults.
//!
//! # Invariants
//! - Settings are lazily created with defaults on first read and overwritten
//!   wholesale on save; there is no field-level merge.

use serde::{Deserialize, Serialize};

/// Gallons of finished solution per 1000 sq ft, typical for vineyard spraying.
pub const DEFAULT_APPLICATION_RATE: f64 = 20.0;

/// Consecutive same-chemical uses before a rotation warning is suggested.
pub const DEFAULT_ROTATION_ALERT_THRESHOLD: u32 = 3;

/// Single application-wide settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Placeholder for a weather provider key; unused by the core.
    pub weather_api_key: String,
    /// Default gallons per 1000 area-units used for solution volume.
    pub default_application_rate: f64,
    /// Threshold consumed by rotation planning outside this core.
    pub rotation_alert_threshold: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weather_api_key: String::new(),
            default_application_rate: DEFAULT_APPLICATION_RATE,
            rotation_alert_threshold: DEFAULT_ROTATION_ALERT_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.weather_api_key, "");
        assert_eq!(settings.default_application_rate, 20.0);
        assert_eq!(settings.rotation_alert_threshold, 3);
    }

    #[test]
    fn serde_uses_camel_case_field_names() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert!(value.get("weatherApiKey").is_some());
        assert!(value.get("defaultApplicationRate").is_some());
        assert!(value.get("rotationAlertThreshold").is_some());
    }
}
