//! SPI bus abstractions
//!
//! Provides the blocking SPI master capability that display transports are
//! written against, and the immutable bus configuration record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, HalError};
use crate::gpio::{ClaimPins, Pin, PinSet, Port};

/// SPI bus master
///
/// Every transfer blocks until the bus transaction completes. There is no
/// queuing and no timeout at this layer.
pub trait SpiBus {
    /// Claim the peripheral and configure it
    ///
    /// Fails with [`HalError::PeripheralBusy`] if another driver already
    /// owns the peripheral. Calling `init` again from the owning driver
    /// reconfigures the bus.
    fn init(&mut self, config: &SpiConfig) -> Result<(), HalError>;

    /// Transmit bytes, blocking until the transfer is complete
    fn blocking_transmit(&mut self, data: &[u8]) -> Result<(), HalError>;
}

/// SPI peripheral instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Peripheral {
    Spi1,
    Spi2,
    Spi3,
    Spi4,
    Spi5,
    Spi6,
}

/// Bus role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    Master,
    Slave,
}

/// Data line direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// MOSI and MISO both active
    TwoLines,
    /// MOSI only (MISO unused)
    TwoLinesTxOnly,
    /// MISO only
    TwoLinesRxOnly,
    /// Single bidirectional data line
    OneLine,
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

/// Chip-select handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChipSelect {
    /// Driven by software
    Soft,
    /// Hardware-driven input (slave role)
    HardInput,
    /// Hardware-driven output, asserted for each transfer
    HardOutput,
}

/// Bus clock divider relative to the peripheral kernel clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Prescaler {
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
    Div256,
}

impl Prescaler {
    /// Divider value
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Div2 => 2,
            Prescaler::Div4 => 4,
            Prescaler::Div8 => 8,
            Prescaler::Div16 => 16,
            Prescaler::Div32 => 32,
            Prescaler::Div64 => 64,
            Prescaler::Div128 => 128,
            Prescaler::Div256 => 256,
        }
    }
}

/// SPI signal lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiPins {
    pub sclk: Pin,
    pub miso: Pin,
    pub mosi: Pin,
    pub nss: Pin,
}

impl SpiPins {
    /// All lines as a slice-friendly array
    pub const fn as_array(&self) -> [Pin; 4] {
        [self.sclk, self.miso, self.mosi, self.nss]
    }
}

/// SPI configuration
///
/// Built once with [`SpiConfig::builder`] and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiConfig {
    pub peripheral: Peripheral,
    pub role: Role,
    pub direction: Direction,
    /// Word size in bits
    pub data_size: u8,
    pub polarity: Polarity,
    pub phase: Phase,
    pub chip_select: ChipSelect,
    pub prescaler: Prescaler,
    pub pins: SpiPins,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            peripheral: Peripheral::Spi1,
            role: Role::Master,
            direction: Direction::TwoLinesTxOnly,
            data_size: 8,
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
            chip_select: ChipSelect::HardOutput,
            prescaler: Prescaler::Div8,
            pins: SpiPins {
                sclk: Pin::new(Port::G, 11),
                miso: Pin::NONE,
                mosi: Pin::new(Port::B, 5),
                nss: Pin::new(Port::G, 10),
            },
        }
    }
}

impl SpiConfig {
    /// Start from the default display bus configuration
    pub fn builder() -> SpiConfigBuilder {
        SpiConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the word size and that no two bus lines share a pin
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=32).contains(&self.data_size) {
            return Err(ConfigError::InvalidDataSize(self.data_size));
        }
        self.claim_pins(&mut PinSet::new())
    }
}

impl ClaimPins for SpiConfig {
    /// Claim every connected bus line in `pins`
    fn claim_pins(&self, pins: &mut PinSet) -> Result<(), ConfigError> {
        pins.claim_all(&self.pins.as_array())
    }
}

/// Builder for [`SpiConfig`]
///
/// Only the fields that differ from the defaults need to be set.
#[derive(Debug, Clone, Copy)]
pub struct SpiConfigBuilder {
    config: SpiConfig,
}

impl SpiConfigBuilder {
    pub fn peripheral(mut self, peripheral: Peripheral) -> Self {
        self.config.peripheral = peripheral;
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.config.role = role;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    pub fn data_size(mut self, bits: u8) -> Self {
        self.config.data_size = bits;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        let (polarity, phase) = mode.into();
        self.config.polarity = polarity;
        self.config.phase = phase;
        self
    }

    pub fn chip_select(mut self, chip_select: ChipSelect) -> Self {
        self.config.chip_select = chip_select;
        self
    }

    pub fn prescaler(mut self, prescaler: Prescaler) -> Self {
        self.config.prescaler = prescaler;
        self
    }

    pub fn pins(mut self, pins: SpiPins) -> Self {
        self.config.pins = pins;
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidDataSize`] if the word size is outside 4-32 bits
    /// - [`ConfigError::PinConflict`] if two bus lines share a pin
    pub fn build(self) -> Result<SpiConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
