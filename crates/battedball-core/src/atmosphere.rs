//! Fixed ballpark atmosphere and the air density it implies.
//!
//! The density formula is the one the batted-ball fits were made with: standard
//! sea-level density corrected for temperature, an exponential fall-off with
//! elevation, and the partial pressure of water vapour.
//!
//!   rho = 1.2929 * (273 / (T + 273)) * (P * exp(-beta * h) - 0.3783 * RH * SVP / 100) / 760
//!
//! with T in °C, P and SVP in mmHg, h in metres. Result is kg/m³.

use serde::{Deserialize, Serialize};

use crate::{
    fahrenheit_to_celsius, feet_to_m, finite, inhg_to_mmhg, kg_m3_to_lb_ft3, positive, ParamError,
};

/// Standard sea-level density the formula is normalised against (kg/m³).
const RHO_STANDARD: f64 = 1.2929;
/// Standard pressure (mmHg).
const P_STANDARD_MMHG: f64 = 760.0;

/// Atmosphere inputs. Fixed for a simulation; not user-facing yet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    pub temperature_f: f64,
    pub elevation_ft: f64,
    pub relative_humidity_pct: f64,
    pub pressure_inhg: f64,
    /// Exponential density decay with elevation [1/m]
    pub altitude_decay_per_m: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            temperature_f: 70.0,
            elevation_ft: 15.0,
            relative_humidity_pct: 50.0,
            pressure_inhg: 29.92,
            altitude_decay_per_m: 0.000_121_7,
        }
    }
}

impl Atmosphere {
    pub fn validate(&self) -> Result<(), ParamError> {
        finite("temperature_f", self.temperature_f)?;
        finite("elevation_ft", self.elevation_ft)?;
        finite("relative_humidity_pct", self.relative_humidity_pct)?;
        finite("altitude_decay_per_m", self.altitude_decay_per_m)?;
        positive("pressure_inhg", self.pressure_inhg)?;
        Ok(())
    }

    pub fn temperature_c(&self) -> f64 {
        fahrenheit_to_celsius(self.temperature_f)
    }

    /// Air density [kg/m³]
    pub fn air_density_kg_m3(&self) -> f64 {
        let temp_c = self.temperature_c();
        let elev_m = feet_to_m(self.elevation_ft);
        let svp = saturation_vapor_pressure_mmhg(temp_c);
        let p_mmhg = inhg_to_mmhg(self.pressure_inhg);

        let dry = p_mmhg * (-self.altitude_decay_per_m * elev_m).exp();
        let vapour = 0.3783 * self.relative_humidity_pct * svp / 100.0;

        RHO_STANDARD * (273.0 / (temp_c + 273.0)) * (dry - vapour) / P_STANDARD_MMHG
    }

    /// Air density [lb/ft³]
    pub fn air_density_lb_ft3(&self) -> f64 {
        kg_m3_to_lb_ft3(self.air_density_kg_m3())
    }
}

/// Saturation vapour pressure over water [mmHg] for a Celsius temperature.
pub fn saturation_vapor_pressure_mmhg(temp_c: f64) -> f64 {
    4.5841 * ((18.687 - temp_c / 234.5) * temp_c / (257.14 + temp_c)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_park_density() {
        let atm = Atmosphere::default();
        assert_abs_diff_eq!(atm.air_density_kg_m3(), 1.194, epsilon = 1e-3);
        assert_abs_diff_eq!(atm.air_density_lb_ft3(), 0.0747, epsilon = 1e-4);
    }

    #[test]
    fn svp_grows_with_temperature() {
        assert_abs_diff_eq!(saturation_vapor_pressure_mmhg(0.0), 4.5841, epsilon = 1e-9);
        assert!(saturation_vapor_pressure_mmhg(30.0) > saturation_vapor_pressure_mmhg(20.0));
    }

    #[test]
    fn thinner_air_when_hot_high_or_humid() {
        let base = Atmosphere::default();
        let hot = Atmosphere { temperature_f: 95.0, ..base };
        let high = Atmosphere { elevation_ft: 5200.0, ..base };
        let humid = Atmosphere { relative_humidity_pct: 95.0, ..base };
        let rho = base.air_density_kg_m3();
        assert!(hot.air_density_kg_m3() < rho);
        assert!(high.air_density_kg_m3() < rho);
        assert!(humid.air_density_kg_m3() < rho);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let atm: Atmosphere = serde_json::from_str(r#"{ "temperature_f": 50.0 }"#).unwrap();
        assert_eq!(atm.temperature_f, 50.0);
        assert_eq!(atm.pressure_inhg, 29.92);
    }

    #[test]
    fn rejects_non_positive_pressure() {
        let atm = Atmosphere { pressure_inhg: 0.0, ..Atmosphere::default() };
        assert!(atm.validate().is_err());
    }
}
