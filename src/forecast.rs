use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use tracing::{debug, info};

use crate::angles;
use crate::error::{ForecastError, Result};
use crate::irradiance;
use crate::sun::{self, to_local};
use crate::types::{
    DailyForecast, Daylight, Forecast, ForecastMode, ForecastSample, ForecastSeries,
    ForecastSummary, PanelConfiguration, SunTimes,
};

pub const MINUTES_PER_DAY: u32 = 1440;
pub const FIVE_MINUTES: u32 = 5;
pub const FIFTEEN_MINUTES: u32 = 15;

pub fn intervals_per_day(interval_minutes: u32) -> u32 {
    MINUTES_PER_DAY / interval_minutes
}

pub fn validate_interval(interval_minutes: u32) -> Result<()> {
    if interval_minutes == 0 || MINUTES_PER_DAY % interval_minutes != 0 {
        return Err(ForecastError::InvalidWindow { interval_minutes });
    }
    Ok(())
}

/// Last grid instant at or before `t`. The grid is counted from `anchor`,
/// the local midnight of the forecast day.
pub fn grid_floor(
    t: &DateTime<Utc>,
    anchor: &DateTime<Utc>,
    interval_minutes: u32,
) -> DateTime<Utc> {
    let step = TimeDelta::minutes(i64::from(interval_minutes));
    let step_seconds = step.num_seconds();
    let steps = (*t - *anchor).num_seconds().div_euclid(step_seconds);
    let floor = *anchor + TimeDelta::seconds(steps * step_seconds);
    // A sub-second remainder before the anchor still belongs to the previous step.
    if floor > *t {
        floor - step
    } else {
        floor
    }
}

/// First grid instant at or after `t`.
pub fn grid_ceil(
    t: &DateTime<Utc>,
    anchor: &DateTime<Utc>,
    interval_minutes: u32,
) -> DateTime<Utc> {
    let floor = grid_floor(t, anchor, interval_minutes);
    if floor == *t {
        floor
    } else {
        floor + TimeDelta::minutes(i64::from(interval_minutes))
    }
}

pub fn forecast_sample<Tz: TimeZone>(
    panel: &PanelConfiguration,
    t: &DateTime<Utc>,
    tz: &Tz,
    interval_minutes: u32,
) -> ForecastSample {
    let pos = angles::solar_position(panel.latitude(), panel.longitude(), t);
    let (irradiance_w_m2, power_kw) = irradiance::estimate(&pos, panel);
    let interval_energy_kwh = power_kw * f64::from(interval_minutes) / 60.0;
    let sample = ForecastSample {
        timestamp: to_local(t, tz),
        solar_elevation_degrees: pos.elevation,
        solar_azimuth_degrees: pos.azimuth,
        irradiance_w_m2,
        power_kw,
        interval_energy_kwh,
    };
    debug!(
        "{} elev={:.2} az={:.2} irradiance={:.1} W/m2 power={:.3} kW energy={:.4} kWh",
        sample.timestamp,
        sample.solar_elevation_degrees,
        sample.solar_azimuth_degrees,
        sample.irradiance_w_m2,
        sample.power_kw,
        sample.interval_energy_kwh
    );
    sample
}

/// Samples on the interval grid from the sunrise-adjacent point to the
/// sunset-adjacent point of the local day `date`. Grid points are whole
/// intervals after that day's local midnight. Empty when the sun never rises.
pub fn full_day_series<Tz: TimeZone>(
    panel: &PanelConfiguration,
    sun_times: &SunTimes,
    tz: &Tz,
    date: NaiveDate,
    interval_minutes: u32,
) -> Result<ForecastSeries> {
    validate_interval(interval_minutes)?;
    if sun_times.daylight == Daylight::PolarNight {
        return Ok(ForecastSeries::new(interval_minutes, Vec::new()));
    }

    let (anchor, _) = sun::day_bounds(tz, date);
    let first = grid_floor(&sun_times.sunrise.with_timezone(&Utc), &anchor, interval_minutes);
    let last = grid_ceil(&sun_times.sunset.with_timezone(&Utc), &anchor, interval_minutes);
    let step = TimeDelta::minutes(i64::from(interval_minutes));

    let mut samples = Vec::new();
    let mut t = first;
    while t <= last {
        samples.push(forecast_sample(panel, &t, tz, interval_minutes));
        t = t + step;
    }
    Ok(ForecastSeries::new(interval_minutes, samples))
}

/// Suffix of `full_day` at or after `now`; empty once the sun has set.
pub fn remaining_series<Tz: TimeZone>(
    full_day: &ForecastSeries,
    sun_times: &SunTimes,
    now: &DateTime<Tz>,
) -> ForecastSeries {
    let now_utc = now.with_timezone(&Utc);
    if now_utc >= sun_times.sunset.with_timezone(&Utc) {
        return ForecastSeries::new(full_day.interval_minutes(), Vec::new());
    }
    full_day.suffix_from(to_local(&now_utc, &Utc))
}

/// Day-level aggregates. Energy uses the left rectangle rule, so
/// `total_energy_kwh == average_power_kw * series.window_hours()`.
pub fn summarize(series: &ForecastSeries, sun_times: &SunTimes) -> ForecastSummary {
    let mut total_energy_kwh = 0.0;
    let mut power_sum = 0.0;
    let mut peak: Option<&ForecastSample> = None;

    for sample in series.samples() {
        total_energy_kwh += sample.interval_energy_kwh;
        power_sum += sample.power_kw;
        // Strictly greater keeps the earliest of equal peaks.
        if peak.map_or(true, |p| sample.power_kw > p.power_kw) {
            peak = Some(sample);
        }
    }

    let average_power_kw = if series.is_empty() {
        0.0
    } else {
        power_sum / series.len() as f64
    };

    ForecastSummary {
        total_energy_kwh,
        peak_power_kw: peak.map_or(0.0, |p| p.power_kw),
        peak_power_time: peak.map(|p| p.timestamp),
        average_power_kw,
        sunrise_time: sun_times.sunrise,
        sunset_time: sun_times.sunset,
    }
}

/// Full-day and remaining forecasts for the local day containing `now`.
pub fn daily_forecast<Tz: TimeZone>(
    panel: &PanelConfiguration,
    now: &DateTime<Tz>,
    interval_minutes: u32,
) -> Result<DailyForecast> {
    validate_interval(interval_minutes)?;
    let sun_times = sun::sun_times(panel.latitude(), panel.longitude(), now);
    let tz = now.timezone();

    let full_series =
        full_day_series(panel, &sun_times, &tz, now.date_naive(), interval_minutes)?;
    let remaining_samples = remaining_series(&full_series, &sun_times, now);

    let full_day = Forecast {
        mode: ForecastMode::FullDay,
        summary: summarize(&full_series, &sun_times),
        series: full_series,
    };
    let remaining = Forecast {
        mode: ForecastMode::Remaining,
        summary: summarize(&remaining_samples, &sun_times),
        series: remaining_samples,
    };

    info!(
        "forecast {}min: daily {:.3} kWh over {} intervals, remaining {:.3} kWh over {} intervals, peak {:.3} kW",
        interval_minutes,
        full_day.summary.total_energy_kwh,
        full_day.series.len(),
        remaining.summary.total_energy_kwh,
        remaining.series.len(),
        full_day.summary.peak_power_kw
    );

    Ok(DailyForecast {
        sun_times,
        full_day,
        remaining,
    })
}

pub fn generate_forecast<Tz: TimeZone>(
    panel: &PanelConfiguration,
    now: &DateTime<Tz>,
    interval_minutes: u32,
    mode: ForecastMode,
) -> Result<Forecast> {
    let daily = daily_forecast(panel, now, interval_minutes)?;
    Ok(match mode {
        ForecastMode::FullDay => daily.full_day,
        ForecastMode::Remaining => daily.remaining,
    })
}
