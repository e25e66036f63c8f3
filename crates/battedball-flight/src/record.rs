//! Per-step trajectory rows and the finished flight.

use std::io::{self, Write};

use battedball_core::{fps_to_mph, Vec3};
use serde::Serialize;

use crate::error::FlightError;
use crate::force::ForceSample;
use crate::launch::{LaunchParameters, SpinState};

/// One integration step. Never mutated once pushed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectoryRecord {
    /// time since launch [s]
    pub t: f64,
    /// [ft]
    pub position: Vec3,
    /// planar distance from home plate [ft]
    pub r: f64,
    /// azimuth atan2(x, y) [deg]
    pub phi_deg: f64,
    /// [ft/s]
    pub velocity: Vec3,
    pub speed_fps: f64,
    pub speed_mph: f64,
    pub w_perp_rpm: f64,
    pub romega_perp: f64,
    /// air-relative speed [ft/s]
    pub airspeed: f64,
    pub cd: f64,
    pub s: f64,
    pub cl: f64,
    pub wind: Vec3,
    pub drag_accel: Vec3,
    pub w_perp_ratio: f64,
    pub magnus_accel: Vec3,
    /// drag + Magnus + gravity; drives the next step [ft/s²]
    pub accel: Vec3,
    /// set on the row where the ball passes back through the start height
    pub crossed: bool,
}

impl TrajectoryRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        t: f64,
        position: Vec3,
        velocity: Vec3,
        w_perp_rpm: f64,
        romega_perp: f64,
        w_perp_ratio: f64,
        forces: &ForceSample,
        crossed: bool,
    ) -> Self {
        let speed_fps = velocity.norm();
        Self {
            t,
            position,
            r: position.x.hypot(position.y),
            phi_deg: position.x.atan2(position.y).to_degrees(),
            velocity,
            speed_fps,
            speed_mph: fps_to_mph(speed_fps),
            w_perp_rpm,
            romega_perp,
            airspeed: forces.airspeed,
            cd: forces.cd,
            s: forces.s,
            cl: forces.cl,
            wind: forces.wind,
            drag_accel: forces.drag,
            w_perp_ratio,
            magnus_accel: forces.magnus,
            accel: forces.total,
            crossed,
        }
    }
}

/// Headline numbers for a finished flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FlightSummary {
    pub distance_ft: f64,
    pub hang_time_s: f64,
    pub apex_ft: f64,
    pub landing_point: Vec3,
    pub spray_angle_deg: f64,
    pub exit_speed_mph: f64,
    pub launch_angle_deg: f64,
    pub backspin_rpm: f64,
    pub sidespin_rpm: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrajectoryResult {
    pub launch: LaunchParameters,
    pub spin: SpinState,
    pub records: Vec<TrajectoryRecord>,
    /// index of the first crossing record
    pub landing_index: usize,
    /// `r` of the first crossing record [ft]
    pub landing_distance_ft: f64,
}

const CSV_HEADER: &str = "t,x,y,z,r,phi,vx,vy,vz,v,vmph,w_perp,romega_perp,vw,Cd,S,Cl,vxw,vyw,\
adragx,adragy,adragz,w_perp/w,aMagx,aMagy,aMagz,ax,ay,az,flag";

impl TrajectoryResult {
    pub fn new(
        launch: LaunchParameters,
        spin: SpinState,
        records: Vec<TrajectoryRecord>,
    ) -> Result<Self, FlightError> {
        let Some(landing_index) = records.iter().position(|r| r.crossed) else {
            let last = records.last().map_or(0.0, |r| r.t);
            return Err(FlightError::NoLanding {
                steps: records.len().saturating_sub(1),
                elapsed_s: last,
            });
        };
        let landing_distance_ft = records[landing_index].r;
        Ok(Self { launch, spin, records, landing_index, landing_distance_ft })
    }

    /// The crossing record.
    pub fn landing(&self) -> &TrajectoryRecord {
        &self.records[self.landing_index]
    }

    pub fn hang_time(&self) -> f64 {
        self.landing().t
    }

    /// Highest point reached [ft]
    pub fn apex(&self) -> f64 {
        self.records.iter().map(|r| r.position.z).fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn summary(&self) -> FlightSummary {
        let landing = self.landing();
        FlightSummary {
            distance_ft: self.landing_distance_ft,
            hang_time_s: landing.t,
            apex_ft: self.apex(),
            landing_point: landing.position,
            spray_angle_deg: landing.phi_deg,
            exit_speed_mph: self.launch.exit_speed_mph,
            launch_angle_deg: self.launch.launch_angle_deg,
            backspin_rpm: self.spin.backspin_rpm,
            sidespin_rpm: self.spin.sidespin_rpm,
        }
    }

    /// Write the trajectory as a CSV table, one row per record.
    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{CSV_HEADER}")?;
        let mut buf = ryu::Buffer::new();
        for rec in &self.records {
            let fields = [
                rec.t,
                rec.position.x,
                rec.position.y,
                rec.position.z,
                rec.r,
                rec.phi_deg,
                rec.velocity.x,
                rec.velocity.y,
                rec.velocity.z,
                rec.speed_fps,
                rec.speed_mph,
                rec.w_perp_rpm,
                rec.romega_perp,
                rec.airspeed,
                rec.cd,
                rec.s,
                rec.cl,
                rec.wind.x,
                rec.wind.y,
                rec.drag_accel.x,
                rec.drag_accel.y,
                rec.drag_accel.z,
                rec.w_perp_ratio,
                rec.magnus_accel.x,
                rec.magnus_accel.y,
                rec.magnus_accel.z,
                rec.accel.x,
                rec.accel.y,
                rec.accel.z,
            ];
            for value in fields {
                out.write_all(buf.format(value).as_bytes())?;
                out.write_all(b",")?;
            }
            writeln!(out, "{}", u8::from(rec.crossed))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::Handedness;
    use battedball_core::Ball;

    fn sample(t: f64, z: f64, crossed: bool) -> TrajectoryRecord {
        let forces = ForceSample {
            wind: Vec3::zeros(),
            airspeed: 100.0,
            cd: 0.35,
            s: 0.2,
            cl: 0.2,
            drag: Vec3::new(0.0, -10.0, -5.0),
            magnus: Vec3::new(1.0, -2.0, 8.0),
            total: Vec3::new(1.0, -12.0, -29.174),
        };
        let position = Vec3::new(3.0, 4.0, z);
        let velocity = Vec3::new(0.0, 100.0, 10.0);
        TrajectoryRecord::new(t, position, velocity, 2000.0, 25.0, 0.9, &forces, crossed)
    }

    fn result(records: Vec<TrajectoryRecord>) -> Result<TrajectoryResult, FlightError> {
        let launch = LaunchParameters::new(95.0, 25.0, 0.0, Handedness::Right);
        let spin = SpinState::from_launch(&launch, &Ball::default(), 0.0);
        TrajectoryResult::new(launch, spin, records)
    }

    #[test]
    fn derived_fields() {
        let rec = sample(0.0, 1.0, false);
        assert_eq!(rec.r, 5.0);
        assert!((rec.phi_deg - 36.869_897_645).abs() < 1e-6);
        assert!((rec.speed_mph - rec.speed_fps / 1.467).abs() < 1e-12);
    }

    #[test]
    fn landing_is_first_crossing() {
        let res = result(vec![
            sample(0.0, 0.0, false),
            sample(0.01, 12.0, false),
            sample(0.02, -0.1, true),
        ])
        .unwrap();
        assert_eq!(res.landing_distance_ft, 5.0);
        assert_eq!(res.hang_time(), 0.02);
        assert_eq!(res.apex(), 12.0);
        let summary = res.summary();
        assert_eq!(summary.landing_point.z, -0.1);
        assert_eq!(summary.backspin_rpm, 2237.0);
    }

    #[test]
    fn no_crossing_is_an_error() {
        let err = result(vec![sample(0.0, 0.0, false), sample(0.01, 1.0, false)]).unwrap_err();
        assert_eq!(err, FlightError::NoLanding { steps: 1, elapsed_s: 0.01 });
    }

    #[test]
    fn csv_has_header_and_row_per_record() {
        let res = result(vec![sample(0.0, 0.0, false), sample(0.01, -0.5, true)]).unwrap();
        let mut out = Vec::new();
        res.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[0].split(',').count(), 30);
        assert_eq!(lines[2].split(',').count(), 30);
        assert!(lines[1].ends_with(",0"));
        assert!(lines[2].ends_with(",1"));
        assert!(lines[2].starts_with("0.01,3.0,4.0,-0.5,5.0,"));
    }
}
