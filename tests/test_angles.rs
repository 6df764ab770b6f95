use chrono::{DateTime, FixedOffset, TimeZone};
use solar_forecast::angles::*;
use solar_forecast::types::SolarPosition;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, offset_hours: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .unwrap()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
}

fn position(lat: f64, lon: f64, dt: DateTime<FixedOffset>) -> SolarPosition {
    solar_position(lat, lon, &dt)
}

// ── DayOfYear ──

#[test]
fn test_day_of_year_known_dates() {
    assert_eq!(day_of_year(2026, 1, 1), Some(1));
    assert_eq!(day_of_year(2026, 3, 21), Some(80));
    assert_eq!(day_of_year(2026, 12, 31), Some(365));
}

#[test]
fn test_day_of_year_leap_year() {
    assert_eq!(day_of_year(2024, 2, 29), Some(60));
    assert_eq!(day_of_year(2024, 3, 1), Some(61));
    assert_eq!(day_of_year(2024, 12, 31), Some(366));
}

#[test]
fn test_day_of_year_century_leap_rules() {
    assert_eq!(day_of_year(2000, 2, 29), Some(60));
    assert_eq!(day_of_year(1900, 2, 28), Some(59));
    assert_eq!(day_of_year(1900, 2, 29), None);
}

#[test]
fn test_day_of_year_rejects_invalid_dates() {
    assert_eq!(day_of_year(2026, 2, 29), None);
    assert_eq!(day_of_year(2026, 13, 1), None);
    assert_eq!(day_of_year(2026, 4, 0), None);
}

#[test]
fn test_first_day_of_each_month_non_leap() {
    let expected = [1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];
    for (i, &exp) in expected.iter().enumerate() {
        let month = i as u32 + 1;
        assert_eq!(day_of_year(2026, month, 1), Some(exp), "Month {}", month);
    }
}

#[test]
fn test_position_day_of_year_matches_utc_date() {
    // 23:30 at UTC-6 on Dec 31 is already Jan 1 in UTC.
    let pos = position(39.8, -89.6, local(2026, 12, 31, 23, 30, -6));
    assert_eq!(pos.day_of_year, 1);
    let leap = position(0.0, 0.0, local(2024, 12, 31, 12, 0, 0));
    assert_eq!(leap.day_of_year, 366);
}

// ── NormalizeAngle ──

#[test]
fn test_normalize_angle_basic() {
    let cases: &[(f64, f64)] = &[
        (0.0, 0.0),
        (45.0, 45.0),
        (360.0, 0.0),
        (361.0, 1.0),
        (-1.0, 359.0),
        (-90.0, 270.0),
        (405.0, 45.0),
        (-180.0, 180.0),
        (720.0, 0.0),
        (-450.0, 270.0),
    ];
    for &(input, expected) in cases {
        assert_approx!(normalize_angle(input), expected, 1e-9);
    }
}

// ── SolarDeclination / EquationOfTime ──

#[test]
fn test_solar_declination_solstices_equinoxes() {
    assert_approx!(solar_declination(172), 23.45, 0.5);
    assert_approx!(solar_declination(355), -23.45, 0.5);
    assert_approx!(solar_declination(80), 0.0, 1.0);
    assert_approx!(solar_declination(266), 0.0, 1.0);
}

#[test]
fn test_solar_declination_bounded_all_days() {
    for n in 1..=366 {
        let decl = solar_declination(n);
        assert!(decl.abs() <= 23.5, "Day {}: {}", n, decl);
    }
}

#[test]
fn test_equation_of_time_known_extremes() {
    // Early November: sundial ahead by ~16 minutes; mid-February: behind by ~14.
    assert_approx!(equation_of_time(307), 16.4, 1.0);
    assert_approx!(equation_of_time(43), -14.2, 1.0);
}

#[test]
fn test_utc_lst_correction() {
    assert_approx!(utc_lst_correction(0.0, 0.0), 0.0, 1e-12);
    assert_approx!(utc_lst_correction(15.0, 0.0), 1.0, 1e-12);
    assert_approx!(utc_lst_correction(-90.0, 6.0), -5.9, 1e-12);
}

// ── SolarPosition: Springfield equinox, 12:00 CST ──

fn springfield_equinox() -> SolarPosition {
    position(39.8, -89.6, local(2026, 3, 21, 12, 0, -6))
}

#[test]
fn test_springfield_equinox_day_of_year() {
    assert_eq!(springfield_equinox().day_of_year, 80);
}

#[test]
fn test_springfield_equinox_declination() {
    assert_approx!(springfield_equinox().declination, 0.0, 1.0);
}

#[test]
fn test_springfield_equinox_eot() {
    assert_approx!(springfield_equinox().equation_of_time, -7.5, 2.0);
}

#[test]
fn test_springfield_equinox_zenith_and_elevation() {
    let pos = springfield_equinox();
    assert_approx!(pos.zenith, 40.0, 2.0);
    assert_approx!(pos.elevation, 50.0, 2.0);
}

#[test]
fn test_springfield_equinox_azimuth() {
    let pos = springfield_equinox();
    assert!(
        pos.azimuth >= 174.0 && pos.azimuth <= 185.0,
        "azimuth={}",
        pos.azimuth
    );
}

#[test]
fn test_position_independent_of_offset() {
    let a = position(39.8, -89.6, local(2026, 3, 21, 12, 0, -6));
    let b = position(39.8, -89.6, local(2026, 3, 21, 18, 0, 0));
    assert_eq!(a, b);
}

// ── Summer / Winter solstice ──

#[test]
fn test_summer_solstice() {
    let pos = position(39.8, -89.6, local(2026, 6, 21, 12, 0, -6));
    assert_approx!(pos.declination, 23.45, 1.0);
    assert!(pos.zenith < 40.0, "zenith={}", pos.zenith);
    assert!(pos.elevation > 50.0, "elevation={}", pos.elevation);
}

#[test]
fn test_winter_solstice() {
    let pos = position(39.8, -89.6, local(2026, 12, 21, 12, 0, -6));
    assert_approx!(pos.declination, -23.45, 1.0);
    assert!(pos.zenith > 40.0, "zenith={}", pos.zenith);
    assert!(pos.elevation < 50.0, "elevation={}", pos.elevation);
}

// ── HourAngle ──

#[test]
fn test_hour_angle_known_values() {
    assert_approx!(hour_angle(12.0), 0.0, 0.01);
    assert_approx!(hour_angle(13.0), 15.0, 0.01);
    assert_approx!(hour_angle(11.0), -15.0, 0.01);
    assert_approx!(hour_angle(15.0), 45.0, 0.01);
}

// ── DegRad roundtrip ──

#[test]
fn test_known_conversions() {
    assert_approx!(deg_to_rad(180.0), std::f64::consts::PI, 1e-10);
    assert_approx!(deg_to_rad(90.0), std::f64::consts::FRAC_PI_2, 1e-10);
    assert_approx!(rad_to_deg(std::f64::consts::PI), 180.0, 1e-10);
    assert_approx!(rad_to_deg(deg_to_rad(123.456)), 123.456, 1e-10);
}

// ── Latitudes ──

#[test]
fn test_equator_sun_overhead() {
    let pos = position(0.0, 0.0, local(2026, 3, 21, 12, 0, 0));
    assert_approx!(pos.declination, 0.0, 1.0);
    assert!(pos.zenith < 5.0, "zenith={}", pos.zenith);
    assert!(pos.elevation > 85.0, "elevation={}", pos.elevation);
}

#[test]
fn test_polar_summer_and_winter() {
    let summer = position(70.0, 15.0, local(2026, 6, 21, 12, 0, 1));
    assert!(summer.elevation > 0.0);
    let winter = position(70.0, 15.0, local(2026, 12, 21, 12, 0, 1));
    assert!(winter.zenith > 85.0);
}

#[test]
fn test_southern_hemisphere_reversed_seasons() {
    let jun = position(-33.9, 151.2, local(2026, 6, 21, 12, 0, 10));
    let dec = position(-33.9, 151.2, local(2026, 12, 21, 12, 0, 10));
    assert!(jun.zenith > dec.zenith);
    assert!(jun.elevation < dec.elevation);
}

#[test]
fn test_midnight_below_horizon() {
    let pos = position(39.8, -89.6, local(2026, 3, 21, 0, 0, -6));
    assert!(pos.elevation < 0.0);
    assert!(pos.zenith > 90.0);
}

// ── Azimuth ──

#[test]
fn test_morning_east_afternoon_west() {
    let morning = position(39.8, -89.6, local(2026, 6, 21, 9, 0, -6));
    let afternoon = position(39.8, -89.6, local(2026, 6, 21, 16, 0, -6));
    assert!(morning.azimuth > 0.0 && morning.azimuth < 180.0, "{}", morning.azimuth);
    assert!(afternoon.azimuth > 180.0 && afternoon.azimuth < 360.0, "{}", afternoon.azimuth);
}

#[test]
fn test_zenith_elevation_complement_and_azimuth_range() {
    let cases = [
        (39.8, -89.6, local(2026, 1, 15, 8, 0, -6)),
        (0.0, 0.0, local(2026, 6, 21, 12, 0, 0)),
        (-33.9, 151.2, local(2026, 12, 21, 15, 30, 10)),
        (51.5, -0.1, local(2026, 9, 22, 8, 0, 1)),
        (70.0, 25.0, local(2026, 6, 21, 18, 0, 2)),
        (60.0, 10.0, local(2026, 6, 21, 3, 0, 1)),
    ];
    for (lat, lon, dt) in cases {
        let pos = position(lat, lon, dt);
        assert_approx!(pos.zenith + pos.elevation, 90.0, 1e-10);
        assert!((0.0..360.0).contains(&pos.azimuth), "azimuth={}", pos.azimuth);
        assert!((0.0..24.0).contains(&pos.local_solar_time));
    }
}
