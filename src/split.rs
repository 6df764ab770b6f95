use chrono::{DateTime, FixedOffset, TimeZone};

use crate::types::ForecastSample;

/// A forecast curve cut at "now". Both halves carry the boundary sample at
/// exactly "now" so the two curves meet without a gap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitSeries {
    pub past: Vec<ForecastSample>,
    pub future: Vec<ForecastSample>,
}

impl SplitSeries {
    /// The shared sample at "now", if the cut fell inside the curve.
    pub fn boundary(&self) -> Option<&ForecastSample> {
        match (self.past.last(), self.future.first()) {
            (Some(p), Some(f)) if p.timestamp == f.timestamp => Some(f),
            _ => None,
        }
    }

    /// Both halves back to back, with the shared boundary emitted once.
    pub fn joined(&self) -> Vec<ForecastSample> {
        let skip = usize::from(self.boundary().is_some());
        self.past
            .iter()
            .chain(self.future.iter().skip(skip))
            .copied()
            .collect()
    }
}

pub fn interpolate_angle(a1: f64, a2: f64, fraction: f64) -> f64 {
    let diff = a2 - a1;
    let adjusted_diff = if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    };
    (a1 + adjusted_diff * fraction).rem_euclid(360.0)
}

pub fn interpolate_linear(v1: f64, v2: f64, fraction: f64) -> f64 {
    v1 + fraction * (v2 - v1)
}

/// Synthesizes the sample at `at`, which must lie between `before` and `after`.
pub fn interpolate_sample(
    before: &ForecastSample,
    after: &ForecastSample,
    at: DateTime<FixedOffset>,
) -> ForecastSample {
    let span = (after.timestamp - before.timestamp).num_milliseconds();
    let fraction = if span > 0 {
        (at - before.timestamp).num_milliseconds() as f64 / span as f64
    } else {
        0.0
    };
    ForecastSample {
        timestamp: at,
        solar_elevation_degrees: interpolate_linear(
            before.solar_elevation_degrees,
            after.solar_elevation_degrees,
            fraction,
        ),
        solar_azimuth_degrees: interpolate_angle(
            before.solar_azimuth_degrees,
            after.solar_azimuth_degrees,
            fraction,
        ),
        irradiance_w_m2: interpolate_linear(before.irradiance_w_m2, after.irradiance_w_m2, fraction),
        power_kw: interpolate_linear(before.power_kw, after.power_kw, fraction),
        interval_energy_kwh: interpolate_linear(
            before.interval_energy_kwh,
            after.interval_energy_kwh,
            fraction,
        ),
    }
}

/// Cuts `samples` (ascending by timestamp) at `now`.
pub fn split_at<Tz: TimeZone>(samples: &[ForecastSample], now: &DateTime<Tz>) -> SplitSeries {
    let Some(first) = samples.first() else {
        return SplitSeries::default();
    };
    let now = now.with_timezone(first.timestamp.offset());
    let idx = samples.partition_point(|s| s.timestamp < now);

    if idx == samples.len() {
        return SplitSeries {
            past: samples.to_vec(),
            future: Vec::new(),
        };
    }
    if samples[idx].timestamp == now {
        return SplitSeries {
            past: samples[..=idx].to_vec(),
            future: samples[idx..].to_vec(),
        };
    }
    if idx == 0 {
        return SplitSeries {
            past: Vec::new(),
            future: samples.to_vec(),
        };
    }

    let boundary = interpolate_sample(&samples[idx - 1], &samples[idx], now);
    let mut past = samples[..idx].to_vec();
    past.push(boundary);
    let mut future = Vec::with_capacity(samples.len() - idx + 1);
    future.push(boundary);
    future.extend_from_slice(&samples[idx..]);
    SplitSeries { past, future }
}
