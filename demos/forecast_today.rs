use chrono::TimeZone;
use chrono_tz::Europe::Bucharest;

use solar_forecast::forecast::{daily_forecast, FIFTEEN_MINUTES};
use solar_forecast::sun::sunset_countdown;
use solar_forecast::types::PanelConfiguration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let latitude = 45.76;
    let longitude = 21.42;

    let panel = PanelConfiguration::new(latitude, longitude, 30.0, 0.0, 10.0)?;
    let now = Bucharest
        .with_ymd_and_hms(2026, 6, 21, 13, 0, 0)
        .single()
        .ok_or("ambiguous local time")?;

    let daily = daily_forecast(&panel, &now, FIFTEEN_MINUTES)?;
    let countdown = sunset_countdown(latitude, longitude, &now);

    println!("=== Solar Forecast Example ===");
    println!("Location: Timisoara ({:.2}°N, {:.2}°E)", latitude, longitude);
    println!("Now: {}", now);
    println!();
    println!("--- Sun ---");
    println!("Dawn:       {}", daily.sun_times.dawn);
    println!("Sunrise:    {}", daily.sun_times.sunrise);
    println!("Solar noon: {}", daily.sun_times.solar_noon);
    println!("Sunset:     {} (in {})", daily.sun_times.sunset, countdown.human_readable);
    println!("Dusk:       {}", daily.sun_times.dusk);
    println!();
    println!("--- Forecast ({} min) ---", FIFTEEN_MINUTES);
    for sample in daily.full_day.series.samples() {
        println!(
            "{}  elev {:>6.2}°  az {:>6.2}°  {:>7.1} W/m²  {:>6.3} kW",
            sample.timestamp.format("%H:%M"),
            sample.solar_elevation_degrees,
            sample.solar_azimuth_degrees,
            sample.irradiance_w_m2,
            sample.power_kw
        );
    }
    println!();
    let full = &daily.full_day.summary;
    let remaining = &daily.remaining.summary;
    println!("Daily energy:     {:.2} kWh", full.total_energy_kwh);
    println!("Remaining energy: {:.2} kWh", remaining.total_energy_kwh);
    println!("Peak power:       {:.3} kW", full.peak_power_kw);
    if let Some(t) = full.peak_power_time {
        println!("Peak time:        {}", t.format("%H:%M"));
    }
    println!("Average power:    {:.3} kW", full.average_power_kw);
    Ok(())
}
