use crate::angles::{deg_to_rad, normalize_angle};
use crate::types::{PanelConfiguration, SolarPosition};

/// Plane-of-array irradiance at which a panel delivers its rated power (STC).
pub const REFERENCE_IRRADIANCE_W_M2: f64 = 1000.0;
pub const CLEAR_SKY_DNI_W_M2: f64 = 900.0;
pub const EXTINCTION_COEFFICIENT: f64 = 0.14;
pub const MAX_AIR_MASS: f64 = 10.0;

pub fn air_mass(elevation: f64) -> f64 {
    if elevation <= 0.0 {
        return MAX_AIR_MASS;
    }
    (1.0 / deg_to_rad(elevation).sin()).min(MAX_AIR_MASS)
}

/// Clear-sky direct normal irradiance proxy in W/m².
///
/// Zero with the sun at or below the horizon, rising monotonically with elevation
/// and peaking when the sun is highest.
pub fn clear_sky_irradiance(elevation: f64) -> f64 {
    if elevation <= 0.0 {
        return 0.0;
    }
    CLEAR_SKY_DNI_W_M2 * (-EXTINCTION_COEFFICIENT * air_mass(elevation)).exp()
}

/// Panel azimuth in degrees clockwise from north.
pub fn panel_azimuth(panel: &PanelConfiguration) -> f64 {
    normalize_angle(180.0 + panel.orientation_degrees_from_south())
}

/// Projection of the sun vector onto the panel normal, clipped to `[0, 1]`.
pub fn incidence_cosine(pos: &SolarPosition, panel: &PanelConfiguration) -> f64 {
    let elev = deg_to_rad(pos.elevation);
    let tilt = deg_to_rad(panel.tilt_degrees());
    let az_diff = deg_to_rad(pos.azimuth - panel_azimuth(panel));
    let cos_theta = elev.sin() * tilt.cos() + elev.cos() * tilt.sin() * az_diff.cos();
    cos_theta.clamp(0.0, 1.0)
}

pub fn panel_irradiance(pos: &SolarPosition, panel: &PanelConfiguration) -> f64 {
    if pos.elevation <= 0.0 {
        return 0.0;
    }
    (clear_sky_irradiance(pos.elevation) * incidence_cosine(pos, panel)).max(0.0)
}

pub fn power_output(irradiance_w_m2: f64, max_power_kw: f64) -> f64 {
    (max_power_kw * irradiance_w_m2 / REFERENCE_IRRADIANCE_W_M2).clamp(0.0, max_power_kw)
}

/// Irradiance on the panel and the power it yields, `(W/m², kW)`.
pub fn estimate(pos: &SolarPosition, panel: &PanelConfiguration) -> (f64, f64) {
    if pos.elevation <= 0.0 {
        return (0.0, 0.0);
    }
    let irradiance = panel_irradiance(pos, panel);
    (irradiance, power_output(irradiance, panel.max_power_kw()))
}
