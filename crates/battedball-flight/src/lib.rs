//! battedball-flight
//!
//! Batted-ball trajectory solver with fixed-step integration.
//! - Spin is estimated from launch angle, direction and batter handedness.
//! - Drag coefficient grows with spin; lift follows the spin factor S.
//! - Both decay with flight time; the spin axis itself stays fixed.
//! - Integration stops when the ball passes back through its start height.
//!
//! Conventions:
//! - Feet, seconds, mph for exit speed, rpm for spin, degrees for angles.
//! - x lateral, y toward centre field, z up. Direction > 0 rotates toward +x.
//!
//! ```no_run
//! use battedball_flight::{compute_trajectory, Handedness, LaunchParameters, SimulationConfig};
//!
//! let launch = LaunchParameters::new(95.0, 25.0, 0.0, Handedness::Right);
//! let flight = compute_trajectory(&SimulationConfig::default(), &launch)?;
//! println!("{:.1} ft in {:.2}s", flight.landing_distance_ft, flight.hang_time());
//! # Ok::<(), battedball_flight::FlightError>(())
//! ```

use std::time::Instant;

use battedball_core::Environment;

pub mod config;
pub mod error;
pub mod force;
pub mod integrator;
pub mod launch;
pub mod record;

pub use config::{IntegrateOpts, SimulationConfig};
pub use error::{ConfigError, DegenerateInput, FlightError};
pub use force::{ForceModel, ForceSample, SpinDrive};
pub use integrator::{crossed_start_height, integrate};
pub use launch::{launch_record, Handedness, LaunchParameters, SpinState};
pub use record::{FlightSummary, TrajectoryRecord, TrajectoryResult};

/// Top-level API: fly one batted ball under `config`.
pub fn compute_trajectory(
    config: &SimulationConfig,
    launch: &LaunchParameters,
) -> Result<TrajectoryResult, FlightError> {
    run(config, launch, None)
}

/// Same as [`compute_trajectory`], abandoning the run once `deadline` passes.
pub fn compute_trajectory_with_deadline(
    config: &SimulationConfig,
    launch: &LaunchParameters,
    deadline: Instant,
) -> Result<TrajectoryResult, FlightError> {
    run(config, launch, Some(deadline))
}

fn run(
    config: &SimulationConfig,
    launch: &LaunchParameters,
    deadline: Option<Instant>,
) -> Result<TrajectoryResult, FlightError> {
    config
        .validate()
        .map_err(FlightError::from)
        .and_then(|()| launch.validate().map_err(FlightError::from))
        .inspect_err(|err| log::warn!("run rejected: {err}"))?;

    let env = config.environment();
    let spin = SpinState::from_launch(launch, &config.ball, config.wind_gradient_spin_rpm);
    log::debug!(
        "launch {:.1} mph @ {:.1}° dir {:.1}°: backspin={:.0} sidespin={:.0} rpm",
        launch.exit_speed_mph,
        launch.launch_angle_deg,
        launch.direction_deg,
        spin.backspin_rpm,
        spin.sidespin_rpm
    );

    let records = fly(config, &env, &spin, launch, deadline)
        .inspect_err(|err| log::warn!("trajectory failed: {err}"))?;

    let result = TrajectoryResult::new(*launch, spin, records)?;
    log::debug!(
        "landed {:.1} ft at t={:.2}s after {} steps",
        result.landing_distance_ft,
        result.hang_time(),
        result.records.len() - 1
    );
    Ok(result)
}

fn fly(
    config: &SimulationConfig,
    env: &Environment,
    spin: &SpinState,
    launch: &LaunchParameters,
    deadline: Option<Instant>,
) -> Result<Vec<TrajectoryRecord>, FlightError> {
    let model = ForceModel::new(config, env, spin)?;
    let first = launch_record(&model, launch)?;
    integrate(&model, first, launch.start.z, &config.integration, deadline)
}
