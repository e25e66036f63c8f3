//! Drag and Magnus accelerations on the ball.
//!
//! With K the drag-scaling constant and `v_r = v - wind`:
//!
//!   a_drag   = -K * Cd * |v_r| * v_r
//!   a_magnus =  K * (Cl / omega) * |v_r| * (w ⊗ v_r) / (r*omega_perp / r*omega)
//!
//! where `w ⊗ v_r` is the signed cross-product arrangement the spin vector
//! was resolved for (see `magnus_direction`). Gravity is added to z.

use battedball_core::{Environment, Vec3, Wind};
use battedball_models::AeroCoefficients;

use crate::config::SimulationConfig;
use crate::error::DegenerateInput;
use crate::launch::SpinState;

/// Which spin values drive the coefficients of a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinDrive {
    /// Spin fed to the drag-coefficient curve [rpm]
    pub drag_spin_rpm: f64,
    /// Surface speed fed to the spin factor S [ft/s]
    pub lift_r_omega: f64,
    /// romega_perp / romega, normalises the Magnus term
    pub perpendicular_ratio: f64,
}

/// Everything the force model computes for one state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceSample {
    pub wind: Vec3,
    /// |v - wind| [ft/s]
    pub airspeed: f64,
    pub cd: f64,
    pub s: f64,
    pub cl: f64,
    pub drag: Vec3,
    pub magnus: Vec3,
    /// drag + magnus + gravity
    pub total: Vec3,
}

pub struct ForceModel<'a> {
    aero: &'a AeroCoefficients,
    wind: &'a Wind,
    spin: &'a SpinState,
    drag_scale: f64,
    gravity: f64,
    project_spin: bool,
}

impl<'a> ForceModel<'a> {
    pub fn new(
        config: &'a SimulationConfig,
        env: &Environment,
        spin: &'a SpinState,
    ) -> Result<Self, DegenerateInput> {
        if !(spin.omega > 0.0 && spin.romega > 0.0) {
            return Err(DegenerateInput::ZeroSpin);
        }
        Ok(Self {
            aero: &config.aero,
            wind: &config.wind,
            spin,
            drag_scale: env.drag_scale,
            gravity: config.gravity_fps2,
            project_spin: config.project_spin,
        })
    }

    pub fn spin(&self) -> &SpinState {
        self.spin
    }

    pub fn perpendicular_rpm(&self, velocity: &Vec3, t_s: f64) -> Result<f64, DegenerateInput> {
        self.spin.perpendicular_rpm(velocity, self.project_spin, t_s)
    }

    pub fn evaluate(
        &self,
        t_s: f64,
        position: &Vec3,
        velocity: &Vec3,
        drive: SpinDrive,
    ) -> Result<ForceSample, DegenerateInput> {
        if !(drive.perpendicular_ratio > 0.0 && drive.perpendicular_ratio.is_finite()) {
            return Err(DegenerateInput::ZeroPerpendicularSpin { t_s });
        }

        let wind = self.wind.velocity_at(position.z);
        let relative = velocity - wind;
        let airspeed = relative.norm();
        if airspeed <= 0.0 || !airspeed.is_finite() {
            return Err(DegenerateInput::ZeroAirspeed { t_s });
        }

        let cd = self.aero.drag_coefficient(drive.drag_spin_rpm, t_s, airspeed);
        let s = self.aero.spin_factor(drive.lift_r_omega, t_s, airspeed);
        let cl = self.aero.lift_coefficient(s);

        let k = self.drag_scale;
        let drag = relative * (-k * cd * airspeed);
        let magnus = magnus_direction(&self.spin.w, &relative)
            * (k * (cl / self.spin.omega) * airspeed / drive.perpendicular_ratio);

        let total = drag + magnus - Vec3::new(0.0, 0.0, self.gravity);

        Ok(ForceSample { wind, airspeed, cd, s, cl, drag, magnus, total })
    }
}

/// Direction of the Magnus push for spin `w` and air-relative velocity `v`.
///
/// The y and z rows are negated relative to `w × v` because `w` was resolved
/// with backspin about -x for a ball travelling toward +y.
fn magnus_direction(w: &Vec3, v: &Vec3) -> Vec3 {
    Vec3::new(
        w.y * v.z - w.z * v.y,
        -(w.z * v.x - w.x * v.z),
        -(w.x * v.y - w.y * v.x),
    )
}
