pub mod angles;
pub mod attributes;
pub mod battery;
pub mod card;
pub mod config;
pub mod error;
pub mod forecast;
pub mod irradiance;
pub mod split;
pub mod sun;
pub mod switch;
pub mod types;

pub use angles::{
    day_of_year, deg_to_rad, equation_of_time, hour_angle, intermediate_angle_b,
    normalize_angle, rad_to_deg, solar_azimuth, solar_declination, solar_elevation,
    solar_position, solar_zenith_angle, DEGREES_PER_HOUR,
};

pub use attributes::{AttributeSample, ForecastAttributes, SunsetAttributes};

pub use battery::{
    BatteryAttributes, BatteryReading, BatterySettings, ChargingState, Measurement, Unit,
};

pub use card::{build_view, CardCurve, CardView};

pub use config::GuardConfig;

pub use error::{ConfigError, ForecastError};

pub use forecast::{
    daily_forecast, full_day_series, generate_forecast, intervals_per_day, remaining_series,
    summarize, validate_interval, FIFTEEN_MINUTES, FIVE_MINUTES,
};

pub use irradiance::{clear_sky_irradiance, incidence_cosine, power_output};

pub use split::{interpolate_angle, split_at, SplitSeries};

pub use sun::{sun_times, sun_times_on, sunset_countdown};

pub use switch::{GuardSwitch, OptimizationAttributes, OptimizationMode, SwitchKind, SwitchSnapshot};

pub use types::{
    DailyForecast, Daylight, Forecast, ForecastMode, ForecastSample, ForecastSeries,
    ForecastSummary, PanelConfiguration, SolarPosition, SunTimes, SunsetCountdown,
};
