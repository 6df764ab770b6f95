use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, SubsecRound, TimeDelta, TimeZone, Utc,
};
use tracing::debug;

use crate::angles;
use crate::types::{Daylight, SunTimes, SunsetCountdown};

/// Geometric horizon: the sun's centre at 0° elevation.
pub const HORIZON_DEGREES: f64 = 0.0;
pub const CIVIL_TWILIGHT_DEGREES: f64 = -6.0;

const SCAN_STEP_SECONDS: i64 = 600;

pub fn elevation_at(latitude: f64, longitude: f64, t: &DateTime<Utc>) -> f64 {
    angles::solar_position(latitude, longitude, t).elevation
}

/// Re-expresses a UTC instant with the offset `tz` has at that instant.
pub fn to_local<Tz: TimeZone>(t: &DateTime<Utc>, tz: &Tz) -> DateTime<FixedOffset> {
    let offset = t.with_timezone(tz).offset().fix();
    t.with_timezone(&offset)
}

/// First instant of `date` in `tz`, as UTC.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    if let Some(t) = tz.from_local_datetime(&naive).earliest() {
        return t.with_timezone(&Utc);
    }
    // Midnight skipped by a DST jump: the day starts an hour later.
    let later = naive + TimeDelta::hours(1);
    tz.from_local_datetime(&later)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// UTC bounds `[start, end)` of the local calendar day `date` in `tz`.
pub fn day_bounds<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight(tz, date);
    let end = match date.succ_opt() {
        Some(next) => local_midnight(tz, next),
        None => start + TimeDelta::days(1),
    };
    (start, end)
}

fn scan(
    latitude: f64,
    longitude: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, f64)> {
    let mut samples = Vec::new();
    let mut t = start;
    while t < end {
        samples.push((t, elevation_at(latitude, longitude, &t)));
        t = t + TimeDelta::seconds(SCAN_STEP_SECONDS);
    }
    samples.push((end, elevation_at(latitude, longitude, &end)));
    samples
}

/// Narrows `[lo, hi]` to one second around the threshold crossing. Returns the
/// `hi` end truncated to the whole second.
fn bisect(
    latitude: f64,
    longitude: f64,
    mut lo: DateTime<Utc>,
    mut hi: DateTime<Utc>,
    threshold: f64,
    rising: bool,
) -> DateTime<Utc> {
    while hi - lo > TimeDelta::seconds(1) {
        let mid = lo + (hi - lo) / 2;
        let above = elevation_at(latitude, longitude, &mid) > threshold;
        if above == rising {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi.trunc_subsecs(0)
}

fn solar_noon(latitude: f64, longitude: f64, samples: &[(DateTime<Utc>, f64)]) -> DateTime<Utc> {
    let mut best = 0;
    for (i, s) in samples.iter().enumerate() {
        if s.1 > samples[best].1 {
            best = i;
        }
    }
    let mut lo = samples[best.saturating_sub(1)].0;
    let mut hi = samples[(best + 1).min(samples.len() - 1)].0;
    while hi - lo > TimeDelta::seconds(2) {
        let third = (hi - lo) / 3;
        let m1 = lo + third;
        let m2 = hi - third;
        if elevation_at(latitude, longitude, &m1) < elevation_at(latitude, longitude, &m2) {
            lo = m1;
        } else {
            hi = m2;
        }
    }
    (lo + (hi - lo) / 2).trunc_subsecs(0)
}

struct Crossing {
    rise: DateTime<Utc>,
    set: DateTime<Utc>,
    daylight: Daylight,
}

fn crossing(
    latitude: f64,
    longitude: f64,
    samples: &[(DateTime<Utc>, f64)],
    threshold: f64,
    noon: DateTime<Utc>,
) -> Crossing {
    let first = samples[0];
    let last = samples[samples.len() - 1];

    if samples.iter().all(|s| s.1 <= threshold) {
        return Crossing {
            rise: noon,
            set: noon,
            daylight: Daylight::PolarNight,
        };
    }
    let daylight = if samples.iter().all(|s| s.1 > threshold) {
        Daylight::PolarDay
    } else {
        Daylight::Normal
    };

    // Sun already up at the day's start: rise is the start. Sun still up at the
    // day's end: set is the end. A dip below in between is not split out.
    let rise = if first.1 > threshold {
        first.0
    } else {
        samples
            .windows(2)
            .find(|w| w[0].1 <= threshold && w[1].1 > threshold)
            .map(|w| bisect(latitude, longitude, w[0].0, w[1].0, threshold, true))
            .unwrap_or(first.0)
    };
    let set = if last.1 > threshold {
        last.0
    } else {
        samples
            .windows(2)
            .rev()
            .find(|w| w[0].1 > threshold && w[1].1 <= threshold)
            .map(|w| bisect(latitude, longitude, w[0].0, w[1].0, threshold, false))
            .unwrap_or(last.0)
    };

    Crossing {
        rise,
        set,
        daylight,
    }
}

/// Sun events for the local calendar day `date` in `tz`.
pub fn sun_times_on<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    tz: &Tz,
    date: NaiveDate,
) -> SunTimes {
    let (start, end) = day_bounds(tz, date);
    let samples = scan(latitude, longitude, start, end);
    let noon = solar_noon(latitude, longitude, &samples);
    let horizon = crossing(latitude, longitude, &samples, HORIZON_DEGREES, noon);
    let twilight = crossing(latitude, longitude, &samples, CIVIL_TWILIGHT_DEGREES, noon);

    let times = SunTimes {
        dawn: to_local(&twilight.rise, tz),
        sunrise: to_local(&horizon.rise, tz),
        solar_noon: to_local(&noon, tz),
        sunset: to_local(&horizon.set, tz),
        dusk: to_local(&twilight.set, tz),
        daylight: horizon.daylight,
    };
    debug!(
        "sun times {}: sunrise={} noon={} sunset={} ({:?})",
        date, times.sunrise, times.solar_noon, times.sunset, times.daylight
    );
    times
}

/// Sun events for the local calendar day containing `now`.
pub fn sun_times<Tz: TimeZone>(latitude: f64, longitude: f64, now: &DateTime<Tz>) -> SunTimes {
    sun_times_on(latitude, longitude, &now.timezone(), now.date_naive())
}

/// Time left until the next sunset, rolling over to tomorrow's once today's has passed.
pub fn sunset_countdown<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    now: &DateTime<Tz>,
) -> SunsetCountdown {
    let tz = now.timezone();
    let today = now.date_naive();
    let now_utc = now.with_timezone(&Utc);

    let mut next_sunset = sun_times_on(latitude, longitude, &tz, today).sunset;
    let mut is_tomorrow = false;
    if next_sunset.with_timezone(&Utc) <= now_utc {
        let tomorrow = today.succ_opt().unwrap_or(today);
        next_sunset = sun_times_on(latitude, longitude, &tz, tomorrow).sunset;
        is_tomorrow = true;
    }

    let seconds_remaining = (next_sunset.with_timezone(&Utc) - now_utc).num_seconds().max(0);
    let hours_remaining = seconds_remaining / 3600;
    let minutes_remaining = (seconds_remaining % 3600) / 60;
    let mut human_readable = format!("{hours_remaining}h {minutes_remaining}m");
    if is_tomorrow {
        human_readable.push_str(" (tomorrow)");
    }

    SunsetCountdown {
        next_sunset,
        seconds_remaining,
        hours_remaining,
        minutes_remaining,
        is_tomorrow,
        human_readable,
    }
}
