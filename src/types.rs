use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub day_of_year: i32,
    pub declination: f64,
    pub equation_of_time: f64,
    pub local_solar_time: f64,
    pub hour_angle: f64,
    pub zenith: f64,
    pub elevation: f64,
    /// Degrees clockwise from north.
    pub azimuth: f64,
}

/// A fixed PV installation: where it is, how it is mounted and what it is rated at.
///
/// Orientation is measured clockwise from due south, so 0° faces south, 90° west
/// and 270° east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelConfiguration {
    latitude: f64,
    longitude: f64,
    tilt_degrees: f64,
    orientation_degrees_from_south: f64,
    max_power_kw: f64,
}

impl PanelConfiguration {
    pub fn new(
        latitude: f64,
        longitude: f64,
        tilt_degrees: f64,
        orientation_degrees_from_south: f64,
        max_power_kw: f64,
    ) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ForecastError::invalid(
                "latitude",
                format!("{latitude} is outside [-90, 90]"),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ForecastError::invalid(
                "longitude",
                format!("{longitude} is outside [-180, 180]"),
            ));
        }
        if !tilt_degrees.is_finite() || !(0.0..=90.0).contains(&tilt_degrees) {
            return Err(ForecastError::invalid(
                "tilt",
                format!("{tilt_degrees} is outside [0, 90]"),
            ));
        }
        if !orientation_degrees_from_south.is_finite()
            || !(0.0..360.0).contains(&orientation_degrees_from_south)
        {
            return Err(ForecastError::invalid(
                "orientation",
                format!("{orientation_degrees_from_south} is outside [0, 360)"),
            ));
        }
        if !max_power_kw.is_finite() || max_power_kw <= 0.0 {
            return Err(ForecastError::invalid(
                "max_power_kw",
                format!("{max_power_kw} must be greater than zero"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
            tilt_degrees,
            orientation_degrees_from_south,
            max_power_kw,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn tilt_degrees(&self) -> f64 {
        self.tilt_degrees
    }

    pub fn orientation_degrees_from_south(&self) -> f64 {
        self.orientation_degrees_from_south
    }

    pub fn max_power_kw(&self) -> f64 {
        self.max_power_kw
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMode {
    FullDay,
    Remaining,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<FixedOffset>,
    pub solar_elevation_degrees: f64,
    pub solar_azimuth_degrees: f64,
    pub irradiance_w_m2: f64,
    pub power_kw: f64,
    pub interval_energy_kwh: f64,
}

/// Evenly spaced samples in strictly increasing timestamp order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    interval_minutes: u32,
    samples: Vec<ForecastSample>,
}

impl ForecastSeries {
    pub(crate) fn new(interval_minutes: u32, samples: Vec<ForecastSample>) -> Self {
        Self {
            interval_minutes,
            samples,
        }
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    pub fn interval_hours(&self) -> f64 {
        f64::from(self.interval_minutes) / 60.0
    }

    /// Hours covered by the series when every sample stands for one interval.
    pub fn window_hours(&self) -> f64 {
        self.samples.len() as f64 * self.interval_hours()
    }

    pub fn samples(&self) -> &[ForecastSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&ForecastSample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&ForecastSample> {
        self.samples.last()
    }

    /// Samples with `timestamp >= from`, as a series of their own.
    pub fn suffix_from(&self, from: DateTime<FixedOffset>) -> Self {
        let start = self.samples.partition_point(|s| s.timestamp < from);
        Self::new(self.interval_minutes, self.samples[start..].to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSummary {
    pub total_energy_kwh: f64,
    pub peak_power_kw: f64,
    pub peak_power_time: Option<DateTime<FixedOffset>>,
    pub average_power_kw: f64,
    pub sunrise_time: DateTime<FixedOffset>,
    pub sunset_time: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Daylight {
    Normal,
    PolarDay,
    PolarNight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunTimes {
    pub dawn: DateTime<FixedOffset>,
    pub sunrise: DateTime<FixedOffset>,
    pub solar_noon: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub dusk: DateTime<FixedOffset>,
    pub daylight: Daylight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub mode: ForecastMode,
    pub series: ForecastSeries,
    pub summary: ForecastSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub sun_times: SunTimes,
    pub full_day: Forecast,
    pub remaining: Forecast,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SunsetCountdown {
    pub next_sunset: DateTime<FixedOffset>,
    pub seconds_remaining: i64,
    pub hours_remaining: i64,
    pub minutes_remaining: i64,
    pub is_tomorrow: bool,
    pub human_readable: String,
}
