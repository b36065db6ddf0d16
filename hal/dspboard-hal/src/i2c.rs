//! I2C bus abstractions
//!
//! Provides the blocking I2C master capability used by the I2C display
//! transport.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, HalError};
use crate::gpio::{ClaimPins, Pin, PinSet};

/// I2C bus master
pub trait I2cBus {
    /// Claim the peripheral and configure it
    fn init(&mut self, config: &I2cConfig) -> Result<(), HalError>;

    /// Write data to a device at the given 7-bit address
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), HalError>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock line
    pub scl: Pin,
    /// Data line
    pub sda: Pin,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self::with_frequency(100_000);

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self::with_frequency(400_000);

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self::with_frequency(1_000_000);

    const fn with_frequency(frequency: u32) -> Self {
        Self {
            frequency,
            scl: Pin::new(crate::gpio::Port::B, 8),
            sda: Pin::new(crate::gpio::Port::B, 9),
        }
    }

    /// Use different bus lines
    pub const fn pins(self, scl: Pin, sda: Pin) -> Self {
        Self { scl, sda, ..self }
    }
}

impl ClaimPins for I2cConfig {
    fn claim_pins(&self, pins: &mut PinSet) -> Result<(), ConfigError> {
        pins.claim(self.scl)?;
        pins.claim(self.sda)
    }
}
