//! Entity attributes in the shape the host platform publishes them.
//!
//! One canonical schema: `forecast` / `full_day_forecast` lists, remaining-window
//! scalars without suffix, full-day scalars suffixed `_daily` (plus
//! `total_daily_energy_kwh`). Values are rounded here and nowhere else.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::types::{DailyForecast, ForecastSample, ForecastSeries, SunTimes, SunsetCountdown};

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSample {
    pub time: String,
    pub power_kw: f64,
    pub irradiance: f64,
    pub solar_elevation: f64,
    pub solar_azimuth: f64,
    pub energy_kwh: f64,
}

impl From<&ForecastSample> for AttributeSample {
    fn from(sample: &ForecastSample) -> Self {
        Self {
            time: sample.timestamp.to_rfc3339(),
            power_kw: round_to(sample.power_kw, 3),
            irradiance: round_to(sample.irradiance_w_m2, 2),
            solar_elevation: round_to(sample.solar_elevation_degrees, 2),
            solar_azimuth: round_to(sample.solar_azimuth_degrees, 2),
            energy_kwh: round_to(sample.interval_energy_kwh, 4),
        }
    }
}

impl AttributeSample {
    /// Back to a sample; `None` when `time` is not RFC 3339.
    pub fn to_sample(&self) -> Option<ForecastSample> {
        let timestamp = DateTime::parse_from_rfc3339(&self.time).ok()?;
        Some(ForecastSample {
            timestamp,
            solar_elevation_degrees: self.solar_elevation,
            solar_azimuth_degrees: self.solar_azimuth,
            irradiance_w_m2: self.irradiance,
            power_kw: self.power_kw,
            interval_energy_kwh: self.energy_kwh,
        })
    }
}

fn series_attributes(series: &ForecastSeries) -> Vec<AttributeSample> {
    series.samples().iter().map(AttributeSample::from).collect()
}

fn time_attribute(t: &Option<DateTime<FixedOffset>>) -> Option<String> {
    t.as_ref().map(|t| t.to_rfc3339())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastAttributes {
    pub interval_minutes: u32,
    pub forecast: Vec<AttributeSample>,
    pub full_day_forecast: Vec<AttributeSample>,
    pub total_energy: f64,
    pub peak_power_kw: f64,
    pub peak_power_time: Option<String>,
    pub average_power_kw: f64,
    pub total_daily_energy_kwh: f64,
    pub peak_power_kw_daily: f64,
    pub peak_power_time_daily: Option<String>,
    pub average_power_kw_daily: f64,
    pub sunrise_time: String,
    pub sunset_time: String,
}

impl From<&DailyForecast> for ForecastAttributes {
    fn from(daily: &DailyForecast) -> Self {
        let remaining = &daily.remaining.summary;
        let full_day = &daily.full_day.summary;
        Self {
            interval_minutes: daily.full_day.series.interval_minutes(),
            forecast: series_attributes(&daily.remaining.series),
            full_day_forecast: series_attributes(&daily.full_day.series),
            total_energy: round_to(remaining.total_energy_kwh, 3),
            peak_power_kw: round_to(remaining.peak_power_kw, 3),
            peak_power_time: time_attribute(&remaining.peak_power_time),
            average_power_kw: round_to(remaining.average_power_kw, 3),
            total_daily_energy_kwh: round_to(full_day.total_energy_kwh, 3),
            peak_power_kw_daily: round_to(full_day.peak_power_kw, 3),
            peak_power_time_daily: time_attribute(&full_day.peak_power_time),
            average_power_kw_daily: round_to(full_day.average_power_kw, 3),
            sunrise_time: daily.sun_times.sunrise.to_rfc3339(),
            sunset_time: daily.sun_times.sunset.to_rfc3339(),
        }
    }
}

impl ForecastAttributes {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Sun times plus the countdown to the next sunset, as the sunset sensors publish them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunsetAttributes {
    pub dawn: String,
    pub sunrise: String,
    pub solar_noon: String,
    pub sunset: String,
    pub dusk: String,
    pub next_sunset: String,
    pub seconds_remaining: i64,
    pub hours_remaining: i64,
    pub minutes_remaining: i64,
    pub human_readable: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl SunsetAttributes {
    pub fn new(
        sun_times: &SunTimes,
        countdown: &SunsetCountdown,
        latitude: f64,
        longitude: f64,
        timezone: Option<String>,
    ) -> Self {
        Self {
            dawn: sun_times.dawn.to_rfc3339(),
            sunrise: sun_times.sunrise.to_rfc3339(),
            solar_noon: sun_times.solar_noon.to_rfc3339(),
            sunset: sun_times.sunset.to_rfc3339(),
            dusk: sun_times.dusk.to_rfc3339(),
            next_sunset: countdown.next_sunset.to_rfc3339(),
            seconds_remaining: countdown.seconds_remaining,
            hours_remaining: countdown.hours_remaining,
            minutes_remaining: countdown.minutes_remaining,
            human_readable: countdown.human_readable.clone(),
            latitude,
            longitude,
            timezone,
        }
    }
}
