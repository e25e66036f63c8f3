//! Ball geometry and the constants derived once per simulation.
//!
//! Drag and Magnus accelerations both scale with
//!
//!   K = 0.07182 * rho[lb/ft³] * (5.125 / mass_oz) * (circ_in / 9.125)^2
//!
//! which folds ρA/2m for a regulation ball into one number (ft⁻¹).

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{positive, Atmosphere, ParamError};

/// Regulation ball mass [oz]
pub const REFERENCE_MASS_OZ: f64 = 5.125;
/// Regulation ball circumference [in]
pub const REFERENCE_CIRCUMFERENCE_IN: f64 = 9.125;
/// K for a regulation ball per unit density [ft²/lb]
const REFERENCE_DRAG_FACTOR: f64 = 0.07182;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ball {
    pub mass_oz: f64,
    pub circumference_in: f64,
}

impl Default for Ball {
    fn default() -> Self {
        Self { mass_oz: REFERENCE_MASS_OZ, circumference_in: REFERENCE_CIRCUMFERENCE_IN }
    }
}

impl Ball {
    pub fn validate(&self) -> Result<(), ParamError> {
        positive("ball mass_oz", self.mass_oz)?;
        positive("ball circumference_in", self.circumference_in)?;
        Ok(())
    }

    /// Radius [ft]
    pub fn radius_ft(&self) -> f64 {
        self.circumference_in / (2.0 * PI) / 12.0
    }
}

/// Derived constants, read-only for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub rho_kg_m3: f64,
    pub rho_lb_ft3: f64,
    /// Drag-scaling constant K [1/ft]
    pub drag_scale: f64,
}

impl Environment {
    pub fn derive(atmosphere: &Atmosphere, ball: &Ball) -> Self {
        let rho_kg_m3 = atmosphere.air_density_kg_m3();
        let rho_lb_ft3 = atmosphere.air_density_lb_ft3();
        let drag_scale = REFERENCE_DRAG_FACTOR
            * rho_lb_ft3
            * (REFERENCE_MASS_OZ / ball.mass_oz)
            * (ball.circumference_in / REFERENCE_CIRCUMFERENCE_IN).powi(2);

        log::debug!(
            "environment: rho={rho_kg_m3:.4} kg/m3 ({rho_lb_ft3:.5} lb/ft3), K={drag_scale:.6e}"
        );

        Self { rho_kg_m3, rho_lb_ft3, drag_scale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn regulation_ball_scale() {
        let atm = Atmosphere::default();
        let env = Environment::derive(&atm, &Ball::default());
        assert_relative_eq!(env.drag_scale, 0.07182 * env.rho_lb_ft3, epsilon = 1e-15);
        assert_relative_eq!(env.drag_scale, 5.37e-3, epsilon = 1e-5);
    }

    #[test]
    fn heavier_ball_feels_less_drag() {
        let atm = Atmosphere::default();
        let light = Environment::derive(&atm, &Ball::default());
        let heavy = Environment::derive(&atm, &Ball { mass_oz: 6.0, ..Ball::default() });
        let big = Environment::derive(&atm, &Ball { circumference_in: 9.5, ..Ball::default() });
        assert!(heavy.drag_scale < light.drag_scale);
        assert!(big.drag_scale > light.drag_scale);
    }

    #[test]
    fn radius_from_circumference() {
        let ball = Ball::default();
        assert_relative_eq!(ball.radius_ft() * 2.0 * PI * 12.0, 9.125, epsilon = 1e-12);
    }

    #[test]
    fn zero_mass_rejected() {
        assert!(Ball { mass_oz: 0.0, ..Ball::default() }.validate().is_err());
    }
}
