//! HTS221 humidity sensor, used here only for its temperature channel.
//!
//! The die sits next to the Raspberry Pi SoC, so readings run several
//! degrees above room temperature. Nothing here corrects for that.

use super::{expect_device, read_register, read_registers, write_register};
use crate::error::SensorError;
use crate::sensors::TemperatureSensor;
use embedded_hal::i2c::I2c;

pub const DEFAULT_ADDRESS: u8 = 0x5F;

const WHO_AM_I: u8 = 0x0F;
const WHO_AM_I_EXPECTED: u8 = 0xBC;
const CTRL_REG1: u8 = 0x20;
const TEMP_OUT_L: u8 = 0x2A;
const T0_DEGC_X8: u8 = 0x32;
const T1_T0_MSB: u8 = 0x35;
const T0_OUT_L: u8 = 0x3C;

/// Power on, block data update, 1 Hz.
const CTRL_REG1_ACTIVE: u8 = 0x85;
/// Set on the register address to read several registers in one go.
const AUTO_INCREMENT: u8 = 0x80;

/// Factory calibration points for the temperature channel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Calibration {
    t0_degc: f64,
    t1_degc: f64,
    t0_out: i16,
    t1_out: i16,
}

impl Calibration {
    fn from_registers(degc_x8: [u8; 2], msb: u8, out: [u8; 4]) -> Result<Self, SensorError> {
        let t0_x8 = (((msb & 0x03) as u16) << 8) | degc_x8[0] as u16;
        let t1_x8 = (((msb & 0x0C) as u16) << 6) | degc_x8[1] as u16;
        let t0_out = i16::from_le_bytes([out[0], out[1]]);
        let t1_out = i16::from_le_bytes([out[2], out[3]]);

        if t0_out == t1_out {
            return Err(SensorError::CalibrationError(format!(
                "HTS221 calibration points are identical (T0_OUT = T1_OUT = {})",
                t0_out
            )));
        }

        Ok(Self {
            t0_degc: t0_x8 as f64 / 8.0,
            t1_degc: t1_x8 as f64 / 8.0,
            t0_out,
            t1_out,
        })
    }

    /// Linear interpolation between the two calibration points.
    fn celsius(&self, t_out: i16) -> f64 {
        let slope = (self.t1_degc - self.t0_degc) / (self.t1_out as f64 - self.t0_out as f64);
        self.t0_degc + (t_out as f64 - self.t0_out as f64) * slope
    }
}

pub struct Hts221<I> {
    i2c: I,
    address: u8,
    calibration: Calibration,
}

impl<I: I2c> Hts221<I> {
    pub fn new(mut i2c: I, address: u8) -> Result<Self, SensorError> {
        expect_device(&mut i2c, address, "HTS221", WHO_AM_I, WHO_AM_I_EXPECTED)?;
        write_register(&mut i2c, address, CTRL_REG1, CTRL_REG1_ACTIVE)?;

        let mut degc_x8 = [0u8; 2];
        read_registers(&mut i2c, address, T0_DEGC_X8 | AUTO_INCREMENT, &mut degc_x8)?;
        let msb = read_register(&mut i2c, address, T1_T0_MSB)?;
        let mut out = [0u8; 4];
        read_registers(&mut i2c, address, T0_OUT_L | AUTO_INCREMENT, &mut out)?;

        let calibration = Calibration::from_registers(degc_x8, msb, out)?;
        tracing::info!(
            "HTS221 initialised at 0x{:02X} (calibrated {:.1}..{:.1} °C)",
            address,
            calibration.t0_degc,
            calibration.t1_degc
        );

        Ok(Self {
            i2c,
            address,
            calibration,
        })
    }
}

impl<I: I2c> TemperatureSensor for Hts221<I> {
    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        let mut buf = [0u8; 2];
        read_registers(
            &mut self.i2c,
            self.address,
            TEMP_OUT_L | AUTO_INCREMENT,
            &mut buf,
        )?;
        Ok(self.calibration.celsius(i16::from_le_bytes(buf)))
    }
}
