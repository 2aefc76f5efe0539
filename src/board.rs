//! The peripheral the responder talks to.
//!
//! [`SenseBoard`] is everything the magic 8-ball needs from the hardware.
//! [`Board`] assembles one from a motion sensor, a thermometer and a message
//! display, so the real Sense HAT and the terminal simulator share one code
//! path.

use crate::display::MessageDisplay;
use crate::error::{DisplayError, SensorError};
use crate::palette::TextColors;
use crate::sensors::{MotionSample, MotionSensor, TemperatureSensor};

#[cfg_attr(test, mockall::automock)]
pub trait SenseBoard {
    fn read_acceleration(&mut self) -> Result<MotionSample, SensorError>;

    /// Degrees Celsius, taken from the humidity sensor.
    fn read_temperature(&mut self) -> Result<f64, SensorError>;

    fn show_message(
        &mut self,
        text: &str,
        scroll_speed: f64,
        colors: TextColors,
    ) -> Result<(), DisplayError>;

    fn clear_display(&mut self) -> Result<(), DisplayError>;
}

pub struct Board<M, T, D> {
    motion: M,
    thermometer: T,
    display: D,
}

impl<M, T, D> Board<M, T, D>
where
    M: MotionSensor,
    T: TemperatureSensor,
    D: MessageDisplay,
{
    pub fn new(motion: M, thermometer: T, display: D) -> Self {
        Self {
            motion,
            thermometer,
            display,
        }
    }
}

impl<M, T, D> SenseBoard for Board<M, T, D>
where
    M: MotionSensor,
    T: TemperatureSensor,
    D: MessageDisplay,
{
    fn read_acceleration(&mut self) -> Result<MotionSample, SensorError> {
        self.motion.read_acceleration()
    }

    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        self.thermometer.read_temperature()
    }

    fn show_message(
        &mut self,
        text: &str,
        scroll_speed: f64,
        colors: TextColors,
    ) -> Result<(), DisplayError> {
        self.display.show_message(text, scroll_speed, colors)
    }

    fn clear_display(&mut self) -> Result<(), DisplayError> {
        self.display.clear()
    }
}

/// The real thing: LSM9DS1 + HTS221 on I2C, LED matrix framebuffer.
#[cfg(target_os = "linux")]
pub mod sense_hat {
    use super::Board;
    use crate::config::HardwareConfig;
    use crate::display::LedMatrix;
    use crate::display::framebuffer::Framebuffer;
    use crate::error::{ConfigError, Result};
    use crate::sensors::i2c::hts221::Hts221;
    use crate::sensors::i2c::lsm9ds1::{AccelRange, Lsm9ds1};
    use crate::sensors::i2c::open_bus;
    use linux_embedded_hal::I2cdev;

    pub type SenseHat = Board<Lsm9ds1<I2cdev>, Hts221<I2cdev>, LedMatrix<Framebuffer>>;

    /// Open and identify every device. Any failure here is fatal.
    pub fn open(config: &HardwareConfig) -> Result<SenseHat> {
        let range =
            AccelRange::from_g(config.accel_range_g).ok_or_else(|| ConfigError::InvalidValue {
                field: "hardware.accel_range_g".to_string(),
                message: format!("unsupported range {}", config.accel_range_g),
            })?;

        let imu = Lsm9ds1::new(open_bus(&config.i2c_bus)?, config.imu_address, range)?;
        let thermometer = Hts221::new(open_bus(&config.i2c_bus)?, config.humidity_address)?;
        let framebuffer = Framebuffer::open_or_discover(config.framebuffer.as_deref())?;

        Ok(Board::new(imu, thermometer, LedMatrix::new(framebuffer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{Frame, LedMatrix, RecordingSink};
    use crate::palette::BLACK;
    use crate::sensors::simulated::{FixedTemperature, RESTING};

    struct StillMotion;

    impl MotionSensor for StillMotion {
        fn read_acceleration(&mut self) -> Result<MotionSample, SensorError> {
            Ok(RESTING)
        }
    }

    #[test]
    fn test_board_delegates() {
        let mut board = Board::new(
            StillMotion,
            FixedTemperature::new(19.0),
            LedMatrix::new(RecordingSink::default()),
        );

        assert_eq!(board.read_acceleration().unwrap(), RESTING);
        assert_eq!(board.read_temperature().unwrap(), 19.0);
        board.clear_display().unwrap();
        board
            .show_message("ok", 0.0, TextColors::default())
            .unwrap();

        let frames = &board.display.sink().frames;
        assert_eq!(frames[0], Frame::filled(BLACK));
        assert!(frames.len() > 1);
    }
}
