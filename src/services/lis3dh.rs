use embedded_hal::blocking::{
    delay::DelayMs,
    i2c::{Write, WriteRead},
};

use crate::services::traits::{MotionSensor, WakeEdge};

// LIS3DH register map
const REG_WHO_AM_I: u8 = 0x0F;
const REG_CTRL_REG1: u8 = 0x20;
const REG_CTRL_REG2: u8 = 0x21;
const REG_CTRL_REG3: u8 = 0x22;
const REG_CTRL_REG4: u8 = 0x23;
const REG_CTRL_REG5: u8 = 0x24;
const REG_CTRL_REG6: u8 = 0x25;
const REG_REFERENCE: u8 = 0x26;
const REG_INT1_CFG: u8 = 0x30;
const REG_INT1_SRC: u8 = 0x31;
const REG_INT1_THS: u8 = 0x32;
const REG_INT1_DURATION: u8 = 0x33;

// WHO_AM_I response
const CHIP_ID: u8 = 0x33;

// CTRL_REG1: 10 Hz, low-power mode, X/Y/Z enabled
const CTRL1_ODR10_LP_XYZ: u8 = 0x2F;
// CTRL_REG2: high-pass filter routed to the interrupt generator
const CTRL2_HP_IA1: u8 = 0x01;
// CTRL_REG3: interrupt-activity 1 on INT1
const CTRL3_I1_IA1: u8 = 0x40;
// CTRL_REG5: latch interrupt until INT1_SRC is read
const CTRL5_LIR_INT1: u8 = 0x08;
// CTRL_REG6: active-low interrupt polarity
const CTRL6_INT_ACTIVE_LOW: u8 = 0x02;
// INT1_CFG: high event on any axis
const INT1_XYZ_HIGH: u8 = 0x2A;
// INT1_SRC: interrupt-active flag
const INT1_SRC_IA: u8 = 0x40;

/// Default I2C address (SDO low)
pub const DEFAULT_ADDRESS: u8 = 0x18;
/// Alternate I2C address (SDO high)
pub const ALT_ADDRESS: u8 = 0x19;

/// Possible errors in motion sensor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lis3dhError {
    /// I2C transfer error
    Bus,
    /// Device absent or WHO_AM_I mismatch
    NotFound,
}

/// LIS3DH accelerometer driver
///
/// Implements [`MotionSensor`] as a low-power wake-on-motion source: the
/// activity interrupt is latched on INT1 so a motion event survives until
/// the core reads and clears it after resuming from sleep.
pub struct Lis3dh<I2C, D>
where
    I2C: Write + WriteRead,
    D: DelayMs<u32>,
{
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C, D> Lis3dh<I2C, D>
where
    I2C: Write + WriteRead,
    D: DelayMs<u32>,
{
    /// Create a driver at the default address
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    /// Create a driver at an explicit address
    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Release the underlying bus and delay
    pub fn free(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Lis3dhError> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| Lis3dhError::Bus)
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, Lis3dhError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| Lis3dhError::Bus)?;
        Ok(buf[0])
    }
}

impl<I2C, D> MotionSensor for Lis3dh<I2C, D>
where
    I2C: Write + WriteRead,
    D: DelayMs<u32>,
{
    type Error = Lis3dhError;

    fn configure(&mut self, threshold: u8) -> Result<(), Self::Error> {
        if self.read_register(REG_WHO_AM_I)? != CHIP_ID {
            return Err(Lis3dhError::NotFound);
        }

        self.write_register(REG_CTRL_REG1, CTRL1_ODR10_LP_XYZ)?;
        self.write_register(REG_CTRL_REG2, CTRL2_HP_IA1)?;
        self.write_register(REG_CTRL_REG3, CTRL3_I1_IA1)?;
        self.write_register(REG_CTRL_REG4, 0x00)?;
        self.write_register(REG_CTRL_REG5, CTRL5_LIR_INT1)?;
        self.write_register(REG_INT1_THS, threshold & 0x7F)?;
        self.write_register(REG_INT1_DURATION, 0x00)?;
        self.write_register(REG_INT1_CFG, INT1_XYZ_HIGH)?;

        // Clear any event latched during setup
        let _ = self.read_register(REG_INT1_SRC)?;
        Ok(())
    }

    fn calibrate(&mut self, settle_ms: u32) {
        // Reading REFERENCE re-centers the high-pass filter on the
        // current orientation; a stale reference fires spurious wakes
        let _ = self.read_register(REG_REFERENCE);
        let _ = self.read_register(REG_INT1_SRC);
        self.delay.delay_ms(settle_ms);
    }

    fn arm_wake_interrupt(&mut self, edge: WakeEdge) {
        let polarity = match edge {
            WakeEdge::Rising => 0x00,
            WakeEdge::Falling => CTRL6_INT_ACTIVE_LOW,
        };
        let _ = self.write_register(REG_CTRL_REG6, polarity);
    }

    fn read_and_clear_interrupt(&mut self) -> bool {
        match self.read_register(REG_INT1_SRC) {
            Ok(src) => src & INT1_SRC_IA != 0,
            Err(_) => false,
        }
    }
}
