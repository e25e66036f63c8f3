//! battedball-models
//!
//! Aerodynamic coefficient curves for a spinning baseball, as fitted to
//! wind-tunnel and tracking data:
//!
//!   Cd = cd0 + (cdspin * spin_rpm / 1000) * decay
//!   S  = (r * omega_perp / v_w) * decay
//!   Cl = cl2 * S / (cl0 + cl1 * S)
//!
//! where `v_w` is air-relative speed (ft/s) and spin decays with flight time:
//!
//!   decay = exp(-t / (tau * 146.7 / v_w))
//!
//! Exports:
//!   - `AeroCoefficients` with the three curves above
//!   - `spin_decay(t, v_w, tau)`

/// Reference airspeed for the spin-decay time constant [ft/s] (100 mph).
pub const DECAY_REFERENCE_FPS: f64 = 146.7;

/// Spin decay factor after `t_s` seconds at air-relative speed `v_w` (ft/s).
#[inline]
pub fn spin_decay(t_s: f64, v_w: f64, tau_s: f64) -> f64 {
    (-t_s / (tau_s * DECAY_REFERENCE_FPS / v_w)).exp()
}

/// Fitted coefficient constants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AeroCoefficients {
    /// Drag coefficient of a non-spinning ball
    pub cd0: f64,
    /// Drag increase per 1000 rpm of spin
    pub cdspin: f64,
    pub cl0: f64,
    pub cl1: f64,
    pub cl2: f64,
    /// Spin-decay time constant [s]
    pub tau_s: f64,
}

impl Default for AeroCoefficients {
    fn default() -> Self {
        Self {
            cd0: 0.3008,
            cdspin: 0.0292,
            cl0: 0.583,
            cl1: 2.333,
            cl2: 1.120,
            tau_s: 10_000.0,
        }
    }
}

impl AeroCoefficients {
    #[inline]
    pub fn decay(&self, t_s: f64, v_w: f64) -> f64 {
        spin_decay(t_s, v_w, self.tau_s)
    }

    /// Drag coefficient for `spin_rpm` of spin after `t_s` seconds.
    pub fn drag_coefficient(&self, spin_rpm: f64, t_s: f64, v_w: f64) -> f64 {
        self.cd0 + (self.cdspin * spin_rpm / 1000.0) * self.decay(t_s, v_w)
    }

    /// Spin factor S from the perpendicular spin's surface speed `r_omega` (ft/s).
    pub fn spin_factor(&self, r_omega: f64, t_s: f64, v_w: f64) -> f64 {
        (r_omega / v_w) * self.decay(t_s, v_w)
    }

    pub fn lift_coefficient(&self, s: f64) -> f64 {
        self.cl2 * s / (self.cl0 + self.cl1 * s)
    }
}

/* -------------------------------- tests -------------------------------- */
