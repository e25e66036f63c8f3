use serde::{Deserialize, Serialize};

use crate::{finite, mph_to_fps, ParamError, Vec3};

/// Steady wind over the field.
///
/// Direction convention: 0° blows straight out toward centre field (+y),
/// 90° blows toward +x. Wind only acts at or above `onset_height_ft`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed_mph: f64,
    pub direction_deg: f64,
    pub onset_height_ft: f64,
}

impl Wind {
    pub fn new(speed_mph: f64, direction_deg: f64) -> Self {
        Self { speed_mph, direction_deg, onset_height_ft: 0.0 }
    }

    pub fn calm() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        finite("wind speed_mph", self.speed_mph)?;
        finite("wind direction_deg", self.direction_deg)?;
        finite("wind onset_height_ft", self.onset_height_ft)?;
        Ok(())
    }

    /// Lateral (x) component [ft/s]
    pub fn lateral_fps(&self) -> f64 {
        mph_to_fps(self.speed_mph) * self.direction_deg.to_radians().sin()
    }

    /// Outfield (y) component [ft/s]
    pub fn outfield_fps(&self) -> f64 {
        mph_to_fps(self.speed_mph) * self.direction_deg.to_radians().cos()
    }

    /// Wind velocity felt by a ball at height `z_ft`.
    pub fn velocity_at(&self, z_ft: f64) -> Vec3 {
        if z_ft >= self.onset_height_ft {
            Vec3::new(self.lateral_fps(), self.outfield_fps(), 0.0)
        } else {
            Vec3::zeros()
        }
    }
}
