//! Simulation configuration.
//!
//! Every constant the model uses lives here so weather, ball and integration
//! settings can be changed without touching the physics. `Default` is the
//! calibrated ballpark (70 °F, 15 ft, 50 % RH, 29.92 inHg, calm).

use std::fs;
use std::path::Path;

use battedball_core::{Atmosphere, Ball, Environment, ParamError, Wind};
use battedball_models::AeroCoefficients;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Integration options.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrateOpts {
    /// step size [s]
    pub dt: f64,
    pub max_steps: usize,
    /// max flight time [s]
    pub max_time: f64,
}

impl Default for IntegrateOpts {
    fn default() -> Self {
        Self { dt: 0.01, max_steps: 10_000, max_time: 60.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub ball: Ball,
    pub atmosphere: Atmosphere,
    pub wind: Wind,
    pub aero: AeroCoefficients,
    pub integration: IntegrateOpts,
    /// [ft/s²]
    pub gravity_fps2: f64,
    /// Extra spin along the launch direction induced by a wind gradient [rpm]
    pub wind_gradient_spin_rpm: f64,
    /// Remove the velocity-aligned part of the spin before computing lift.
    pub project_spin: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ball: Ball::default(),
            atmosphere: Atmosphere::default(),
            wind: Wind::calm(),
            aero: AeroCoefficients::default(),
            integration: IntegrateOpts::default(),
            gravity_fps2: 32.174,
            wind_gradient_spin_rpm: 0.0,
            project_spin: true,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        self.ball.validate()?;
        self.atmosphere.validate()?;
        self.wind.validate()?;

        let aero = &self.aero;
        for (name, value) in [
            ("cd0", aero.cd0),
            ("cdspin", aero.cdspin),
            ("cl0", aero.cl0),
            ("cl1", aero.cl1),
            ("cl2", aero.cl2),
            ("wind_gradient_spin_rpm", self.wind_gradient_spin_rpm),
        ] {
            if !value.is_finite() {
                return Err(ParamError::NotFinite { name, value });
            }
        }
        for (name, value) in [
            ("tau_s", aero.tau_s),
            ("dt", self.integration.dt),
            ("max_time", self.integration.max_time),
            ("gravity_fps2", self.gravity_fps2),
        ] {
            if !value.is_finite() {
                return Err(ParamError::NotFinite { name, value });
            }
            if value <= 0.0 {
                return Err(ParamError::NotPositive { name, value });
            }
        }
        if self.integration.max_steps == 0 {
            return Err(ParamError::NotPositive { name: "max_steps", value: 0.0 });
        }
        Ok(())
    }

    pub fn environment(&self) -> Environment {
        Environment::derive(&self.atmosphere, &self.ball)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_calibrated_park() {
        let cfg = SimulationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.integration.dt, 0.01);
        assert_eq!(cfg.aero.tau_s, 10_000.0);
        assert_eq!(cfg.ball.mass_oz, 5.125);
        assert_eq!(cfg.wind, Wind::calm());
        assert!(cfg.project_spin);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg = SimulationConfig::from_json_str(
            r#"{ "atmosphere": { "elevation_ft": 5200.0 }, "wind": { "speed_mph": 8.0 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.atmosphere.elevation_ft, 5200.0);
        assert_eq!(cfg.atmosphere.temperature_f, 70.0);
        assert_eq!(cfg.wind.speed_mph, 8.0);
        assert_eq!(cfg.integration, IntegrateOpts::default());
    }

    #[test]
    fn rejects_bad_step() {
        let err = SimulationConfig::from_json_str(r#"{ "integration": { "dt": 0.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ParamError::NotPositive { name: "dt", .. })));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SimulationConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimulationConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
