use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatterySettings {
    capacity_kwh: f64,
    min_discharge_percentage: u8,
    low_battery_threshold: u8,
}

impl BatterySettings {
    pub fn new(
        capacity_kwh: f64,
        min_discharge_percentage: u8,
        low_battery_threshold: u8,
    ) -> Result<Self> {
        if !capacity_kwh.is_finite() || capacity_kwh <= 0.0 {
            return Err(ForecastError::invalid(
                "battery_capacity",
                format!("must be positive, got {capacity_kwh}"),
            ));
        }
        if min_discharge_percentage > 100 {
            return Err(ForecastError::invalid(
                "min_discharge_percentage",
                format!("must be within [0, 100], got {min_discharge_percentage}"),
            ));
        }
        if low_battery_threshold > 100 {
            return Err(ForecastError::invalid(
                "low_battery_threshold",
                format!("must be within [0, 100], got {low_battery_threshold}"),
            ));
        }
        Ok(Self {
            capacity_kwh,
            min_discharge_percentage,
            low_battery_threshold,
        })
    }

    pub fn capacity_kwh(&self) -> f64 {
        self.capacity_kwh
    }

    pub fn min_discharge_percentage(&self) -> u8 {
        self.min_discharge_percentage
    }

    pub fn low_battery_threshold(&self) -> u8 {
        self.low_battery_threshold
    }

    /// Energy stored above the minimum discharge floor at `level_percent`.
    pub fn usable_energy_kwh(&self, level_percent: f64) -> f64 {
        let floor = f64::from(self.min_discharge_percentage);
        let above_floor = (level_percent.min(100.0) - floor).max(0.0);
        self.capacity_kwh * above_floor / 100.0
    }

    /// Attributes of the battery sensor, echoing the configured sizing next to the reading.
    pub fn evaluate(&self, reading: &BatteryReading, pv_max_power_kw: f64) -> BatteryAttributes {
        BatteryAttributes {
            level_percent: reading.level_percent,
            threshold: self.low_battery_threshold,
            is_low: reading.level_percent < f64::from(self.low_battery_threshold),
            charging_state: ChargingState::from(reading.is_charging),
            usable_energy_kwh: self.usable_energy_kwh(reading.level_percent),
            pv_max_power: Measurement::new(pv_max_power_kw, Unit::Kilowatt),
            battery_capacity: Measurement::new(self.capacity_kwh, Unit::KilowattHour),
            min_discharge_percentage: Measurement::new(
                f64::from(self.min_discharge_percentage),
                Unit::Percent,
            ),
        }
    }
}

/// One poll of the inverter's battery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryReading {
    pub level_percent: f64,
    pub is_charging: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargingState {
    Charging,
    NotCharging,
    Unknown,
}

impl From<Option<bool>> for ChargingState {
    fn from(is_charging: Option<bool>) -> Self {
        match is_charging {
            Some(true) => Self::Charging,
            Some(false) => Self::NotCharging,
            None => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryAttributes {
    pub level_percent: f64,
    pub threshold: u8,
    pub is_low: bool,
    pub charging_state: ChargingState,
    pub usable_energy_kwh: f64,
    pub pv_max_power: Measurement,
    pub battery_capacity: Measurement,
    pub min_discharge_percentage: Measurement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kW")]
    Kilowatt,
    #[serde(rename = "kWh")]
    KilowattHour,
    #[serde(rename = "%")]
    Percent,
}

/// A configured quantity published as `{"value": .., "unit": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}
