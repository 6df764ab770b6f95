//! Prints the guard's entity attributes as JSON.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use solar_forecast::attributes::{ForecastAttributes, SunsetAttributes};
use solar_forecast::battery::BatteryReading;
use solar_forecast::config::GuardConfig;
use solar_forecast::switch::{GuardSwitch, SwitchKind};
use solar_forecast::{forecast, sun};
use tracing::info;

#[derive(Parser)]
#[command(name = "forecast")]
#[command(author, version, about = "Solar forecast and battery attributes for the discharge guard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full-day and remaining forecast attributes
    Forecast(ForecastArgs),

    /// Sun times and the countdown to the next sunset
    Sun(CommonArgs),

    /// Battery level sensor attributes for one reading
    Battery(BatteryArgs),

    /// Management and optimization switch states
    Switch(SwitchArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Path to the TOML configuration
    #[arg(long)]
    config: PathBuf,

    /// Evaluate at this instant instead of the current time (RFC 3339)
    #[arg(long, value_parser = parse_instant)]
    at: Option<DateTime<FixedOffset>>,
}

#[derive(Args)]
struct ForecastArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Interval in minutes, overriding `forecast_interval` from the config
    #[arg(long)]
    interval: Option<u32>,
}

#[derive(Args)]
struct BatteryArgs {
    /// Path to the TOML configuration
    #[arg(long)]
    config: PathBuf,

    /// State of charge in percent
    #[arg(long)]
    level: f64,

    /// Whether the battery is charging; omitted means unknown
    #[arg(long)]
    charging: Option<bool>,
}

#[derive(Args)]
struct SwitchArgs {
    /// Path to the TOML configuration
    #[arg(long)]
    config: PathBuf,

    /// Turn battery management on or off (default on)
    #[arg(long)]
    enabled: Option<bool>,

    /// Turn battery optimization on or off (default off)
    #[arg(long)]
    optimization: Option<bool>,
}

fn parse_instant(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("expected RFC 3339 timestamp: {e}"))
}

fn resolve_now(tz: &Tz, at: Option<DateTime<FixedOffset>>) -> DateTime<Tz> {
    match at {
        Some(t) => t.with_timezone(tz),
        None => Utc::now().with_timezone(tz),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Forecast(args) => {
            let config = GuardConfig::load(&args.common.config)?;
            info!("Loaded config for {}", config.name);
            let panel = config.panel()?;
            let now = resolve_now(&config.timezone()?, args.common.at);
            let interval = args.interval.unwrap_or(config.forecast_interval);
            let daily = forecast::daily_forecast(&panel, &now, interval)?;
            serde_json::to_string_pretty(&ForecastAttributes::from(&daily))?
        }
        Commands::Sun(args) => {
            let config = GuardConfig::load(&args.config)?;
            let now = resolve_now(&config.timezone()?, args.at);
            let times = sun::sun_times(config.latitude, config.longitude, &now);
            let countdown = sun::sunset_countdown(config.latitude, config.longitude, &now);
            info!("Next sunset in {}", countdown.human_readable);
            let attributes = SunsetAttributes::new(
                &times,
                &countdown,
                config.latitude,
                config.longitude,
                Some(config.timezone.clone()),
            );
            serde_json::to_string_pretty(&attributes)?
        }
        Commands::Battery(args) => {
            let config = GuardConfig::load(&args.config)?;
            let reading = BatteryReading {
                level_percent: args.level,
                is_charging: args.charging,
            };
            let attributes = config.battery()?.evaluate(&reading, config.pv_max_power);
            serde_json::to_string_pretty(&attributes)?
        }
        Commands::Switch(args) => {
            let config = GuardConfig::load(&args.config)?;
            let mut enabled = GuardSwitch::new(SwitchKind::Enabled);
            let mut optimization = GuardSwitch::new(SwitchKind::Optimization);
            if let Some(on) = args.enabled {
                enabled.set(on);
            }
            if let Some(on) = args.optimization {
                optimization.set(on);
            }
            let snapshots = [
                enabled.snapshot(&config.name),
                optimization.snapshot(&config.name),
            ];
            serde_json::to_string_pretty(&snapshots)?
        }
    };

    println!("{output}");
    Ok(())
}
