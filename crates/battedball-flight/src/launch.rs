//! Launch conditions -> initial kinematic and spin state.
//!
//! Spin is not measured; it is estimated from launch geometry with linear fits
//! to tracked batted balls:
//!
//!   backspin = -763 + 120 * angle + 21 * direction * sign
//!   sidespin = -sign * 849 - 94 * direction
//!
//! Frame: x lateral, y toward centre field, z up. Angles in degrees.

use battedball_core::{mph_to_fps, rad_s_to_rpm, rpm_to_rad_s, Ball, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::DegenerateInput;
use crate::force::{ForceModel, SpinDrive};
use crate::record::TrajectoryRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Right,
    Left,
}

impl Handedness {
    pub fn sign(self) -> f64 {
        match self {
            Handedness::Right => 1.0,
            Handedness::Left => -1.0,
        }
    }

    /// `+1` is a right-handed batter, `-1` a left-handed one. Anything else is `None`.
    #[allow(clippy::float_cmp)]
    pub fn from_sign(sign: f64) -> Option<Self> {
        if sign == 1.0 {
            Some(Handedness::Right)
        } else if sign == -1.0 {
            Some(Handedness::Left)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchParameters {
    /// Starting position [ft]; `start.z` is the height the ball must return to.
    pub start: Vec3,
    pub exit_speed_mph: f64,
    pub launch_angle_deg: f64,
    pub direction_deg: f64,
    pub handedness: Handedness,
}

impl LaunchParameters {
    pub fn new(
        exit_speed_mph: f64,
        launch_angle_deg: f64,
        direction_deg: f64,
        handedness: Handedness,
    ) -> Self {
        Self {
            start: Vec3::zeros(),
            exit_speed_mph,
            launch_angle_deg,
            direction_deg,
            handedness,
        }
    }

    #[must_use]
    pub fn starting_at(mut self, start: Vec3) -> Self {
        self.start = start;
        self
    }

    pub fn validate(&self) -> Result<(), DegenerateInput> {
        if !(self.exit_speed_mph.is_finite() && self.exit_speed_mph > 0.0) {
            return Err(DegenerateInput::ExitSpeed(self.exit_speed_mph));
        }
        if !self.launch_angle_deg.is_finite() {
            return Err(DegenerateInput::NonFinite("launch_angle_deg"));
        }
        if !self.direction_deg.is_finite() {
            return Err(DegenerateInput::NonFinite("direction_deg"));
        }
        if !self.start.iter().all(|c| c.is_finite()) {
            return Err(DegenerateInput::NonFinite("start"));
        }
        Ok(())
    }

    /// Launch velocity [ft/s]: elevation by launch angle, then azimuth by direction.
    pub fn initial_velocity(&self) -> Vec3 {
        let v0 = mph_to_fps(self.exit_speed_mph);
        let (sa, ca) = self.launch_angle_deg.to_radians().sin_cos();
        let (sd, cd) = self.direction_deg.to_radians().sin_cos();
        Vec3::new(v0 * ca * sd, v0 * ca * cd, v0 * sa)
    }
}

/// Spin fixed at launch. Only its projection on the changing velocity
/// direction varies through the flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinState {
    pub backspin_rpm: f64,
    pub sidespin_rpm: f64,
    /// |(backspin, sidespin)| [rpm]
    pub spin_rpm: f64,
    /// Angular velocity [rad/s]
    pub w: Vec3,
    /// Total angular speed [rad/s]
    pub omega: f64,
    /// Surface speed of the total spin, r * omega [ft/s]
    pub romega: f64,
    pub radius_ft: f64,
}

impl SpinState {
    pub fn from_launch(
        launch: &LaunchParameters,
        ball: &Ball,
        wind_gradient_spin_rpm: f64,
    ) -> Self {
        let sign = launch.handedness.sign();
        let angle = launch.launch_angle_deg;
        let direction = launch.direction_deg;

        let backspin_rpm = -763.0 + 120.0 * angle + 21.0 * direction * sign;
        let sidespin_rpm = -sign * 849.0 - 94.0 * direction;
        let spin_rpm = backspin_rpm.hypot(sidespin_rpm);

        let (sa, ca) = angle.to_radians().sin_cos();
        let (sd, cd) = direction.to_radians().sin_cos();
        let v0 = launch.initial_velocity();
        let along = v0 / v0.norm() * wind_gradient_spin_rpm;

        let w = Vec3::new(
            rpm_to_rad_s(-backspin_rpm * cd - sidespin_rpm * sa * sd + along.x),
            rpm_to_rad_s(-backspin_rpm * sd - sidespin_rpm * sa * cd + along.y),
            rpm_to_rad_s(sidespin_rpm * ca + along.z),
        );
        let omega = rpm_to_rad_s(spin_rpm);
        let radius_ft = ball.radius_ft();

        Self {
            backspin_rpm,
            sidespin_rpm,
            spin_rpm,
            w,
            omega,
            romega: radius_ft * omega,
            radius_ft,
        }
    }

    /// Spin perpendicular to `velocity` [rpm].
    ///
    /// `spin² = perp² + parallel²`, with the parallel part taken from the
    /// angular-velocity vector. A negative radicand means the fixed spin axis
    /// and the current velocity disagree and is reported, not clamped.
    pub fn perpendicular_rpm(
        &self,
        velocity: &Vec3,
        project: bool,
        t_s: f64,
    ) -> Result<f64, DegenerateInput> {
        if !project {
            return Ok(self.spin_rpm);
        }
        let speed = velocity.norm();
        if speed <= 0.0 || !speed.is_finite() {
            return Err(DegenerateInput::ZeroVelocity { t_s });
        }
        let parallel = rad_s_to_rpm(self.w.dot(velocity) / speed);
        let radicand = self.spin_rpm * self.spin_rpm - parallel * parallel;
        if radicand < 0.0 {
            return Err(DegenerateInput::NegativeSpinRadicand { t_s, radicand });
        }
        Ok(radicand.sqrt())
    }

    /// Surface speed r * omega for a spin given in rpm [ft/s].
    pub fn surface_speed(&self, rpm: f64) -> f64 {
        self.radius_ft * rpm_to_rad_s(rpm)
    }
}

/// The t = 0 row: starting position, launch velocity, and the forces that
/// will drive the first step. Lift uses the full spin at launch.
pub fn launch_record(
    model: &ForceModel<'_>,
    launch: &LaunchParameters,
) -> Result<TrajectoryRecord, DegenerateInput> {
    let spin = model.spin();
    let velocity = launch.initial_velocity();
    let w_perp_rpm = model.perpendicular_rpm(&velocity, 0.0)?;

    let drive = SpinDrive {
        drag_spin_rpm: spin.spin_rpm,
        lift_r_omega: spin.romega,
        perpendicular_ratio: 1.0,
    };
    let forces = model.evaluate(0.0, &launch.start, &velocity, drive)?;

    Ok(TrajectoryRecord::new(
        0.0,
        launch.start,
        velocity,
        w_perp_rpm,
        spin.romega,
        1.0,
        &forces,
        false,
    ))
}
