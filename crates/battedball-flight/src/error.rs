use std::io;

use battedball_core::ParamError;
use thiserror::Error;

/// A launch or intermediate state for which the force model is undefined.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegenerateInput {
    #[error("exit speed must be positive and finite, got {0} mph")]
    ExitSpeed(f64),
    #[error("launch parameter `{0}` is not finite")]
    NonFinite(&'static str),
    #[error("total spin is zero, Magnus term undefined")]
    ZeroSpin,
    #[error("velocity vanished at t={t_s:.2}s")]
    ZeroVelocity { t_s: f64 },
    #[error("air-relative speed vanished at t={t_s:.2}s")]
    ZeroAirspeed { t_s: f64 },
    #[error("perpendicular spin radicand is negative ({radicand:.3}) at t={t_s:.2}s")]
    NegativeSpinRadicand { t_s: f64, radicand: f64 },
    #[error("perpendicular spin vanished at t={t_s:.2}s")]
    ZeroPerpendicularSpin { t_s: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlightError {
    #[error("invalid simulation config: {0}")]
    InvalidConfig(#[from] ParamError),
    #[error("degenerate launch: {0}")]
    Degenerate(#[from] DegenerateInput),
    #[error("ball did not return to start height within {steps} steps ({elapsed_s:.2}s)")]
    NoLanding { steps: usize, elapsed_s: f64 },
    #[error("deadline exceeded after {steps} steps")]
    DeadlineExceeded { steps: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] io::Error),
    #[error("parsing config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ParamError),
}
