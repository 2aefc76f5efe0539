use crate::error::SensorError;
use embedded_hal::i2c::I2c;

pub mod hts221;
pub mod lsm9ds1;

fn bus_error<E: embedded_hal::i2c::Error>(err: E) -> SensorError {
    SensorError::I2cError(format!("{:?}", err))
}

pub(crate) fn read_register<I: I2c>(
    i2c: &mut I,
    address: u8,
    register: u8,
) -> Result<u8, SensorError> {
    let mut buf = [0u8; 1];
    read_registers(i2c, address, register, &mut buf)?;
    Ok(buf[0])
}

pub(crate) fn read_registers<I: I2c>(
    i2c: &mut I,
    address: u8,
    register: u8,
    buf: &mut [u8],
) -> Result<(), SensorError> {
    i2c.write_read(address, &[register], buf).map_err(bus_error)
}

pub(crate) fn write_register<I: I2c>(
    i2c: &mut I,
    address: u8,
    register: u8,
    value: u8,
) -> Result<(), SensorError> {
    i2c.write(address, &[register, value]).map_err(bus_error)
}

/// Check the identification register before talking to a device.
pub(crate) fn expect_device<I: I2c>(
    i2c: &mut I,
    address: u8,
    device: &'static str,
    register: u8,
    expected: u8,
) -> Result<(), SensorError> {
    let found = read_register(i2c, address, register)?;
    if found != expected {
        return Err(SensorError::UnexpectedDevice {
            device,
            expected,
            found,
        });
    }
    Ok(())
}

/// Open an I2C bus device node such as `/dev/i2c-1`.
#[cfg(target_os = "linux")]
pub fn open_bus(path: &str) -> Result<linux_embedded_hal::I2cdev, SensorError> {
    linux_embedded_hal::I2cdev::new(path)
        .map_err(|e| SensorError::InitializationError(format!("Failed to open {}: {}", path, e)))
}
