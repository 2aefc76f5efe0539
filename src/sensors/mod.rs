use crate::error::SensorError;

pub mod i2c;
pub mod simulated;

/// Acceleration in g on the three board axes at one polling instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionSample {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Absolute value of each axis.
    pub fn magnitudes(&self) -> [f64; 3] {
        [self.x.abs(), self.y.abs(), self.z.abs()]
    }
}

pub trait MotionSensor {
    fn read_acceleration(&mut self) -> Result<MotionSample, SensorError>;
}

pub trait TemperatureSensor {
    /// Degrees Celsius.
    fn read_temperature(&mut self) -> Result<f64, SensorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitudes_drop_sign() {
        let sample = MotionSample::new(3.0, -3.0, 5.0);
        assert_eq!(sample.magnitudes(), [3.0, 3.0, 5.0]);
    }
}
