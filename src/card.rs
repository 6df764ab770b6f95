//! Display model behind the dashboard card.
//!
//! The card reads two attributes of the forecast entity, `full_day_forecast` and
//! `total_energy`, and draws the curve cut at "now". Building the view is a pure
//! function of `(attributes, now)`; drawing it is left to the caller.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::Value;
use tracing::warn;

use crate::attributes::AttributeSample;
use crate::split::{self, SplitSeries};
use crate::types::ForecastSample;

#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    /// Nothing usable in the attributes.
    NoData,
    Curve(CardCurve),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardCurve {
    pub series: SplitSeries,
    /// Where the dashed marker goes; `None` when "now" lies outside the curve.
    pub now_marker: Option<DateTime<FixedOffset>>,
    pub remaining_energy_kwh: f64,
    pub peak_power_kw: f64,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl CardCurve {
    pub fn remaining_label(&self) -> String {
        format!("{:.1} kWh remaining", self.remaining_energy_kwh)
    }

    /// Horizontal position of `t` in `[0, 1]` across the curve's time span.
    pub fn x_fraction(&self, t: &DateTime<FixedOffset>) -> f64 {
        let span = (self.end - self.start).num_milliseconds();
        if span <= 0 {
            return 0.0;
        }
        let offset = (*t - self.start).num_milliseconds() as f64 / span as f64;
        offset.clamp(0.0, 1.0)
    }

    /// Vertical position of `power_kw` in `[0, 1]`, scaled to the peak.
    pub fn y_fraction(&self, power_kw: f64) -> f64 {
        if self.peak_power_kw <= 0.0 {
            return 0.0;
        }
        (power_kw / self.peak_power_kw).clamp(0.0, 1.0)
    }
}

fn parse_samples(points: &[Value]) -> Vec<ForecastSample> {
    let mut samples: Vec<ForecastSample> = points
        .iter()
        .filter_map(|point| {
            let parsed = serde_json::from_value::<AttributeSample>(point.clone())
                .ok()
                .and_then(|a| a.to_sample());
            if parsed.is_none() {
                warn!("skipping malformed forecast point: {}", point);
            }
            parsed
        })
        .collect();
    samples.sort_by_key(|s| s.timestamp);
    samples.dedup_by_key(|s| s.timestamp);
    samples
}

pub fn build_view<Tz: TimeZone>(attributes: &Value, now: &DateTime<Tz>) -> CardView {
    let Some(points) = attributes.get("full_day_forecast").and_then(Value::as_array) else {
        warn!("forecast entity has no full_day_forecast attribute");
        return CardView::NoData;
    };
    let samples = parse_samples(points);
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        warn!("full_day_forecast is empty");
        return CardView::NoData;
    };
    let (start, end) = (first.timestamp, last.timestamp);

    let now_local = now.with_timezone(start.offset());
    let remaining_energy_kwh = match attributes.get("total_energy").and_then(Value::as_f64) {
        Some(total) => total,
        None => {
            warn!("total_energy missing, summing the curve after now");
            samples
                .iter()
                .filter(|s| s.timestamp >= now_local)
                .map(|s| s.interval_energy_kwh)
                .sum()
        }
    };
    let peak_power_kw = samples.iter().map(|s| s.power_kw).fold(0.0, f64::max);
    let now_marker = (start..=end).contains(&now_local).then_some(now_local);

    CardView::Curve(CardCurve {
        series: split::split_at(&samples, &now_local),
        now_marker,
        remaining_energy_kwh,
        peak_power_kw,
        start,
        end,
    })
}
