//! Fixed-step trajectory integration.
//!
//! The acceleration stored on record k-1 advances the state to record k:
//!
//! ```text
//! v_k = v_{k-1} + a_{k-1} dt
//! x_k = x_{k-1} + v_{k-1} dt + ½ a_{k-1} dt²
//! ```
//!
//! The force model is then evaluated at (x_k, v_k) to fill record k, whose
//! acceleration drives step k+1. Drag and lift coefficients of step k use the
//! perpendicular spin carried on record k-1.
//!
//! The loop stops on the first record whose height offset from the start
//! changes sign. The landing point is that sample, not an interpolated zero.

use std::time::Instant;

use crate::config::IntegrateOpts;
use crate::error::{DegenerateInput, FlightError};
use crate::force::{ForceModel, SpinDrive};
use crate::record::TrajectoryRecord;

/// Whether a step from height `prev_z` to `z` passed back through `start_z`.
///
/// A ball that drops below the start height straight off the launch point
/// counts as crossing on that step.
pub fn crossed_start_height(prev_z: f64, z: f64, start_z: f64) -> bool {
    let before = prev_z - start_z;
    let after = z - start_z;
    before * after < 0.0 || (before == 0.0 && after < 0.0)
}

/// Integrate from the launch record until the ball returns to `start_z`.
///
/// Fails with `NoLanding` once `opts.max_steps` or `opts.max_time` is
/// exhausted, and with `DeadlineExceeded` if `deadline` passes first.
pub fn integrate(
    model: &ForceModel<'_>,
    first: TrajectoryRecord,
    start_z: f64,
    opts: &IntegrateOpts,
    deadline: Option<Instant>,
) -> Result<Vec<TrajectoryRecord>, FlightError> {
    let dt = opts.dt;
    let mut out = Vec::with_capacity(opts.max_steps.min(2_048) + 1);
    out.push(first);

    let mut prev = first;
    for k in 1..=opts.max_steps {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Err(FlightError::DeadlineExceeded { steps: k - 1 });
            }
        }

        let t = k as f64 * dt;
        if t > opts.max_time {
            return Err(FlightError::NoLanding { steps: k - 1, elapsed_s: prev.t });
        }

        let next = step(model, &prev, t, dt, start_z)?;
        log::trace!(
            "t={:.2} pos=({:.2}, {:.2}, {:.2}) v={:.1} Cd={:.3} Cl={:.3}",
            next.t,
            next.position.x,
            next.position.y,
            next.position.z,
            next.speed_fps,
            next.cd,
            next.cl
        );
        out.push(next);

        if next.crossed {
            return Ok(out);
        }
        prev = next;
    }

    Err(FlightError::NoLanding { steps: opts.max_steps, elapsed_s: prev.t })
}

fn step(
    model: &ForceModel<'_>,
    prev: &TrajectoryRecord,
    t: f64,
    dt: f64,
    start_z: f64,
) -> Result<TrajectoryRecord, DegenerateInput> {
    let accel = prev.accel;
    let velocity = prev.velocity + accel * dt;
    let position = prev.position + prev.velocity * dt + accel * (0.5 * dt * dt);

    let w_perp_rpm = model.perpendicular_rpm(&velocity, t)?;
    let romega_perp = model.spin().surface_speed(w_perp_rpm);
    let w_perp_ratio = romega_perp / model.spin().romega;

    let drive = SpinDrive {
        drag_spin_rpm: prev.w_perp_rpm,
        lift_r_omega: prev.romega_perp,
        perpendicular_ratio: w_perp_ratio,
    };
    let forces = model.evaluate(t, &position, &velocity, drive)?;
    let crossed = crossed_start_height(prev.position.z, position.z, start_z);

    Ok(TrajectoryRecord::new(
        t,
        position,
        velocity,
        w_perp_rpm,
        romega_perp,
        w_perp_ratio,
        &forces,
        crossed,
    ))
}
