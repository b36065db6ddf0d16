//! Error types shared by every hardware capability

use core::fmt;

use crate::gpio::Pin;

/// Errors reported by hardware capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// The peripheral is already owned by another driver
    PeripheralBusy,
    /// The pin cannot be used for the requested function
    InvalidPin(Pin),
    /// A bus transaction failed
    Bus,
    /// A bus transaction did not complete in time
    Timeout,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::PeripheralBusy => write!(f, "peripheral already claimed"),
            HalError::InvalidPin(pin) => write!(f, "invalid pin {pin}"),
            HalError::Bus => write!(f, "bus transaction failed"),
            HalError::Timeout => write!(f, "bus transaction timed out"),
        }
    }
}

impl core::error::Error for HalError {}

/// Errors detected while building a configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The same physical line is assigned to two functions
    PinConflict(Pin),
    /// SPI word size outside 4..=32 bits
    InvalidDataSize(u8),
    /// I2C address does not fit in 7 bits
    InvalidAddress(u8),
    /// More pins claimed than a [`PinSet`](crate::gpio::PinSet) can track
    TooManyPins,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PinConflict(pin) => write!(f, "pin {pin} assigned twice"),
            ConfigError::InvalidDataSize(bits) => {
                write!(f, "invalid data size {bits} (expected 4-32 bits)")
            }
            ConfigError::InvalidAddress(addr) => {
                write!(f, "invalid I2C address 0x{addr:02X} (max 0x7F)")
            }
            ConfigError::TooManyPins => write!(f, "too many pins claimed"),
        }
    }
}

impl core::error::Error for ConfigError {}
