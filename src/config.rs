//! Installation settings read from a TOML file.

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::battery::BatterySettings;
use crate::error::ConfigError;
use crate::forecast;
use crate::types::PanelConfiguration;

pub const DEFAULT_NAME: &str = "GROWATT Battery Discharge Guard";

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_pv_max_power() -> f64 {
    10.0
}

fn default_panel_tilt() -> f64 {
    30.0
}

fn default_battery_capacity() -> f64 {
    10.0
}

fn default_min_discharge_percentage() -> u8 {
    10
}

fn default_low_battery_threshold() -> u8 {
    20
}

fn default_update_interval() -> u64 {
    30
}

fn default_forecast_interval() -> u32 {
    forecast::FIFTEEN_MINUTES
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default = "default_name")]
    pub name: String,

    pub latitude: f64,
    pub longitude: f64,

    /// IANA zone name, e.g. "Europe/Bucharest"
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Rated PV output (kW)
    #[serde(default = "default_pv_max_power")]
    pub pv_max_power: f64,

    /// Degrees from horizontal
    #[serde(default = "default_panel_tilt")]
    pub panel_tilt: f64,

    /// Degrees clockwise from south
    #[serde(default)]
    pub panel_orientation: f64,

    /// kWh
    #[serde(default = "default_battery_capacity")]
    pub battery_capacity: f64,

    #[serde(default = "default_min_discharge_percentage")]
    pub min_discharge_percentage: u8,

    #[serde(default = "default_low_battery_threshold")]
    pub low_battery_threshold: u8,

    /// Host polling period (seconds)
    #[serde(default = "default_update_interval")]
    pub update_interval: u64,

    /// Forecast resolution (minutes)
    #[serde(default = "default_forecast_interval")]
    pub forecast_interval: u32,
}

impl GuardConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates every section, so a config that loads is usable.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.panel()?;
        config.battery()?;
        config.timezone()?;
        forecast::validate_interval(config.forecast_interval)?;
        Ok(config)
    }

    pub fn panel(&self) -> Result<PanelConfiguration, ConfigError> {
        Ok(PanelConfiguration::new(
            self.latitude,
            self.longitude,
            self.panel_tilt,
            self.panel_orientation,
            self.pv_max_power,
        )?)
    }

    pub fn battery(&self) -> Result<BatterySettings, ConfigError> {
        Ok(BatterySettings::new(
            self.battery_capacity,
            self.min_discharge_percentage,
            self.low_battery_threshold,
        )?)
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }
}
