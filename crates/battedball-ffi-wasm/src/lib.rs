// crates/battedball-ffi-wasm/src/lib.rs
//
// WASM bindings: one trajectory per call, for a browser input panel and renderer.

use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;

// --- our crates ---
use battedball_core::Vec3;
use battedball_flight::{
    compute_trajectory, FlightSummary, Handedness, LaunchParameters, SimulationConfig,
    TrajectoryResult,
};

// Better panic messages in browser console
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/* --------------------------- Shared DTOs (JS) --------------------------- */

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsLaunchInput {
    #[serde(default)]
    pub x0: f64,
    #[serde(default)]
    pub y0: f64,
    #[serde(default)]
    pub z0: f64,
    pub exit_speed_mph: f64,
    pub launch_angle_deg: f64,
    pub direction_deg: f64,
    /// +1 right-handed batter, -1 left-handed
    pub sign: f64,
}

impl TryFrom<JsLaunchInput> for LaunchParameters {
    type Error = String;

    fn try_from(inp: JsLaunchInput) -> Result<Self, Self::Error> {
        let handedness = Handedness::from_sign(inp.sign)
            .ok_or_else(|| format!("sign must be +1 or -1, got {}", inp.sign))?;
        let launch = LaunchParameters::new(
            inp.exit_speed_mph,
            inp.launch_angle_deg,
            inp.direction_deg,
            handedness,
        );
        Ok(launch.starting_at(Vec3::new(inp.x0, inp.y0, inp.z0)))
    }
}

/// The columns a field renderer needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsTrajectoryPoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub r: f64,
    pub phi: f64,
    pub vmph: f64,
    pub flag: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsTrajectoryResult {
    pub points: Vec<JsTrajectoryPoint>,
    pub distance_ft: f64,
    pub summary: FlightSummary,
}

impl From<&TrajectoryResult> for JsTrajectoryResult {
    fn from(flight: &TrajectoryResult) -> Self {
        JsTrajectoryResult {
            points: flight
                .records
                .iter()
                .map(|r| JsTrajectoryPoint {
                    t: r.t,
                    x: r.position.x,
                    y: r.position.y,
                    z: r.position.z,
                    r: r.r,
                    phi: r.phi_deg,
                    vmph: r.speed_mph,
                    flag: u8::from(r.crossed),
                })
                .collect(),
            distance_ft: flight.landing_distance_ft,
            summary: flight.summary(),
        }
    }
}

/* ------------------------------ Solver glue ----------------------------- */

fn config_from(config_json: Option<&str>) -> Result<SimulationConfig, String> {
    match config_json {
        Some(text) if !text.trim().is_empty() => {
            SimulationConfig::from_json_str(text).map_err(|e| e.to_string())
        }
        _ => Ok(SimulationConfig::default()),
    }
}

fn solve(input: JsLaunchInput, config_json: Option<&str>) -> Result<TrajectoryResult, String> {
    let config = config_from(config_json)?;
    let launch = LaunchParameters::try_from(input)?;
    compute_trajectory(&config, &launch).map_err(|e| e.to_string())
}

/* ------------------------------- Exports -------------------------------- */

/// Fly one ball. `config_json` optionally overrides the default ballpark.
#[wasm_bindgen]
pub fn compute_trajectory_js(
    input: JsValue,
    config_json: Option<String>,
) -> Result<JsValue, JsValue> {
    let inp: JsLaunchInput = swb::from_value(input)?;
    let flight = solve(inp, config_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
    swb::to_value(&JsTrajectoryResult::from(&flight)).map_err(|e| e.into())
}

/// Full per-step table as CSV text.
#[wasm_bindgen]
pub fn trajectory_csv_js(input: JsValue, config_json: Option<String>) -> Result<String, JsValue> {
    let inp: JsLaunchInput = swb::from_value(input)?;
    let flight = solve(inp, config_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
    let mut out = Vec::new();
    flight.write_csv(&mut out).map_err(|e| JsValue::from_str(&e.to_string()))?;
    String::from_utf8(out).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The default config as JSON, for the UI to show or edit.
#[wasm_bindgen]
pub fn default_config_js() -> Result<String, JsValue> {
    serde_json::to_string_pretty(&SimulationConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
