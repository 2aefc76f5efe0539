//! Shake detection.

use crate::sensors::MotionSample;
use serde::{Deserialize, Serialize};

/// Per-axis trigger levels in g.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisThresholds {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for AxisThresholds {
    /// Found by shaking the board; lower is more sensitive.
    fn default() -> Self {
        Self {
            x: 2.0,
            y: 2.0,
            z: 2.0,
        }
    }
}

impl AxisThresholds {
    /// A sample is a shake only when every axis magnitude is strictly above
    /// its threshold. The sign of the acceleration is ignored.
    pub fn is_shake(&self, sample: &MotionSample) -> bool {
        let [x, y, z] = sample.magnitudes();
        x > self.x && y > self.y && z > self.z
    }

    pub fn as_array(&self) -> [(&'static str, f64); 3] {
        [("x", self.x), ("y", self.y), ("z", self.z)]
    }
}
