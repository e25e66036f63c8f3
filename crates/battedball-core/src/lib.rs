//! Core batted-ball math utilities
//!
//! Includes:
//! - Units & conversions (the imperial units the flight model is fitted in)
//! - Fixed atmosphere and air density
//! - Ball geometry and the derived drag-scaling constant
//! - Wind representation

use std::f64::consts::PI;

use thiserror::Error;

pub mod atmosphere;
pub mod environment;
pub mod wind;

pub use atmosphere::Atmosphere;
pub use environment::{Ball, Environment};
pub use wind::Wind;

/// Shared 3-vector (feet, ft/s, ft/s² or rad/s depending on the field).
pub type Vec3 = nalgebra::Vector3<f64>;

/// -------------------------
/// Units & Conversions
/// -------------------------

/// mph -> ft/s factor used throughout the empirical fits.
pub const MPH_TO_FPS: f64 = 1.467;

pub fn mph_to_fps(v: f64) -> f64 { v * MPH_TO_FPS }
pub fn fps_to_mph(v: f64) -> f64 { v / MPH_TO_FPS }

pub fn rpm_to_rad_s(rpm: f64) -> f64 { rpm * PI / 30.0 }
pub fn rad_s_to_rpm(w: f64) -> f64 { w * 30.0 / PI }

pub fn fahrenheit_to_celsius(t: f64) -> f64 { (5.0 / 9.0) * (t - 32.0) }

pub fn feet_to_m(ft: f64) -> f64 { ft / 3.2808 }

pub fn inhg_to_mmhg(p: f64) -> f64 { p * 1000.0 / 39.37 }

pub fn kg_m3_to_lb_ft3(rho: f64) -> f64 { rho * 0.06261 }

/// -------------------------
/// Parameter validation
/// -------------------------

/// A fixed physical parameter outside the range the model accepts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, ParamError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParamError::NotFinite { name, value })
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, ParamError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ParamError::NotPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn speed_conversions_invert() {
        assert_relative_eq!(mph_to_fps(100.0), 146.7, epsilon = 1e-12);
        assert_relative_eq!(fps_to_mph(mph_to_fps(95.0)), 95.0, epsilon = 1e-12);
    }

    #[test]
    fn spin_conversions() {
        assert_relative_eq!(rpm_to_rad_s(30.0), PI, epsilon = 1e-12);
        assert_relative_eq!(rad_s_to_rpm(rpm_to_rad_s(2200.0)), 2200.0, epsilon = 1e-9);
    }

    #[test]
    fn weather_conversions() {
        assert_relative_eq!(fahrenheit_to_celsius(212.0), 100.0, epsilon = 1e-12);
        assert_relative_eq!(inhg_to_mmhg(29.92), 759.969, epsilon = 1e-3);
        assert_relative_eq!(feet_to_m(3.2808), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn validation_rejects_nan_and_zero() {
        assert!(positive("mass", 1.0).is_ok());
        assert_eq!(
            positive("mass", 0.0),
            Err(ParamError::NotPositive { name: "mass", value: 0.0 })
        );
        assert!(matches!(finite("t", f64::NAN), Err(ParamError::NotFinite { .. })));
    }
}
