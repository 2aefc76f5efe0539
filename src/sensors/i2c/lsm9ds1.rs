//! LSM9DS1 accelerometer, as fitted to the Sense HAT.
//!
//! Only the accelerometer half of the accel/gyro die is used. It runs at
//! 119 Hz with block data update on, so a burst read of the six output
//! registers always returns one coherent sample.

use super::{expect_device, read_registers, write_register};
use crate::error::SensorError;
use crate::sensors::{MotionSample, MotionSensor};
use embedded_hal::i2c::I2c;

pub const DEFAULT_ADDRESS: u8 = 0x6A;

const WHO_AM_I: u8 = 0x0F;
const WHO_AM_I_EXPECTED: u8 = 0x68;
const CTRL_REG6_XL: u8 = 0x20;
const CTRL_REG8: u8 = 0x22;
const OUT_X_L_XL: u8 = 0x28;

const ODR_119_HZ: u8 = 0b011 << 5;
const CTRL_REG8_BDU_IF_ADD_INC: u8 = 0x44;

/// Accelerometer full-scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelRange {
    G2,
    G4,
    G8,
    G16,
}

impl AccelRange {
    pub fn from_g(g: u8) -> Option<Self> {
        match g {
            2 => Some(AccelRange::G2),
            4 => Some(AccelRange::G4),
            8 => Some(AccelRange::G8),
            16 => Some(AccelRange::G16),
            _ => None,
        }
    }

    /// FS_XL field of CTRL_REG6_XL.
    fn register_bits(self) -> u8 {
        let fs = match self {
            AccelRange::G2 => 0b00,
            AccelRange::G16 => 0b01,
            AccelRange::G4 => 0b10,
            AccelRange::G8 => 0b11,
        };
        fs << 3
    }

    /// g per LSB.
    fn sensitivity(self) -> f64 {
        match self {
            AccelRange::G2 => 0.061e-3,
            AccelRange::G4 => 0.122e-3,
            AccelRange::G8 => 0.244e-3,
            AccelRange::G16 => 0.732e-3,
        }
    }
}

pub struct Lsm9ds1<I> {
    i2c: I,
    address: u8,
    range: AccelRange,
}

impl<I: I2c> Lsm9ds1<I> {
    pub fn new(i2c: I, address: u8, range: AccelRange) -> Result<Self, SensorError> {
        let mut sensor = Self {
            i2c,
            address,
            range,
        };
        sensor.init()?;
        Ok(sensor)
    }

    fn init(&mut self) -> Result<(), SensorError> {
        expect_device(
            &mut self.i2c,
            self.address,
            "LSM9DS1",
            WHO_AM_I,
            WHO_AM_I_EXPECTED,
        )?;

        write_register(&mut self.i2c, self.address, CTRL_REG8, CTRL_REG8_BDU_IF_ADD_INC)?;
        write_register(
            &mut self.i2c,
            self.address,
            CTRL_REG6_XL,
            ODR_119_HZ | self.range.register_bits(),
        )?;

        tracing::info!(
            "LSM9DS1 accelerometer initialised at 0x{:02X} ({:?})",
            self.address,
            self.range
        );
        Ok(())
    }

    #[cfg(test)]
    fn bus(&self) -> &I {
        &self.i2c
    }
}

impl<I: I2c> MotionSensor for Lsm9ds1<I> {
    fn read_acceleration(&mut self) -> Result<MotionSample, SensorError> {
        let mut buf = [0u8; 6];
        read_registers(&mut self.i2c, self.address, OUT_X_L_XL, &mut buf)?;

        let scale = self.range.sensitivity();
        let axis = |lo: usize| i16::from_le_bytes([buf[lo], buf[lo + 1]]) as f64 * scale;
        Ok(MotionSample::new(axis(0), axis(2), axis(4)))
    }
}
