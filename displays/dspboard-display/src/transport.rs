//! Display transports
//!
//! A transport frames outbound bytes as either commands or data for a
//! display controller and owns the controller's reset line. Every call
//! blocks until the bus transaction completes; there is no buffering.
//!
//! ## Hardware Requirements
//!
//! - [`FourWireSpi`]: SPI bus (SCLK, MOSI, NSS) plus DC and RESET outputs
//! - [`I2cTransport`]: I2C bus plus a RESET output

use embedded_hal::delay::DelayNs;

use dspboard_hal::gpio::{ClaimPins, OutputPin, Pin, PinSet, Port};
use dspboard_hal::i2c::{I2cBus, I2cConfig};
use dspboard_hal::spi::{SpiBus, SpiConfig};
use dspboard_hal::{ConfigError, HalError};

use crate::error::DisplayError;

/// Time RESET is held low, then allowed to settle high
pub const RESET_SETTLE_MS: u32 = 10;

/// Command/data framing over a physical bus
pub trait Transport {
    /// Transport configuration
    type Config: ClaimPins;

    /// Configure the control lines and the bus, then pulse RESET
    ///
    /// Must complete before any command is sent. An invalid configuration
    /// is rejected before any line is touched. A bus that cannot be claimed
    /// fails initialization; it is not retried.
    fn init<D: DelayNs>(&mut self, config: &Self::Config, delay: &mut D)
        -> Result<(), DisplayError>;

    /// Send one command byte
    fn send_command(&mut self, command: u8) -> Result<(), HalError>;

    /// Send data bytes in a single transfer
    fn send_data(&mut self, data: &[u8]) -> Result<(), HalError>;

    /// Send one data byte
    fn send_byte(&mut self, byte: u8) -> Result<(), HalError> {
        self.send_data(&[byte])
    }
}

fn pulse_reset<R: OutputPin, D: DelayNs>(reset: &mut R, delay: &mut D) {
    reset.set_low();
    delay.delay_ms(RESET_SETTLE_MS);
    reset.set_high();
    delay.delay_ms(RESET_SETTLE_MS);
    #[cfg(feature = "defmt")]
    defmt::debug!("display reset pulse complete");
}

/// 4-wire SPI transport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourWireSpiConfig {
    /// Bus configuration
    pub spi: SpiConfig,
    /// Data/command select line (low = command, high = data)
    pub dc: Pin,
    /// Reset line (active low)
    pub reset: Pin,
}

impl Default for FourWireSpiConfig {
    fn default() -> Self {
        Self {
            spi: SpiConfig::default(),
            dc: Pin::new(Port::B, 4),
            reset: Pin::new(Port::B, 15),
        }
    }
}

impl FourWireSpiConfig {
    /// Start from the default display wiring
    pub fn builder() -> FourWireSpiConfigBuilder {
        FourWireSpiConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the bus settings and that DC, RESET and the SPI lines are
    /// distinct
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spi.validate()?;
        self.claim_pins(&mut PinSet::new())
    }
}

impl ClaimPins for FourWireSpiConfig {
    fn claim_pins(&self, pins: &mut PinSet) -> Result<(), ConfigError> {
        self.spi.claim_pins(pins)?;
        pins.claim(self.dc)?;
        pins.claim(self.reset)
    }
}

/// Builder for [`FourWireSpiConfig`]
#[derive(Debug, Clone, Copy)]
pub struct FourWireSpiConfigBuilder {
    config: FourWireSpiConfig,
}

impl FourWireSpiConfigBuilder {
    pub fn spi(mut self, spi: SpiConfig) -> Self {
        self.config.spi = spi;
        self
    }

    pub fn dc(mut self, pin: Pin) -> Self {
        self.config.dc = pin;
        self
    }

    pub fn reset(mut self, pin: Pin) -> Self {
        self.config.reset = pin;
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PinConflict`] if DC, RESET and the SPI lines
    /// do not name distinct pins.
    pub fn build(self) -> Result<FourWireSpiConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// 4-wire SPI transport
///
/// Owns the SPI bus handle and the DC and RESET lines.
pub struct FourWireSpi<S, DC, RST> {
    spi: S,
    dc: DC,
    reset: RST,
}

impl<S, DC, RST> FourWireSpi<S, DC, RST>
where
    S: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Wrap the bus and control lines; nothing is configured until `init`
    pub fn new(spi: S, dc: DC, reset: RST) -> Self {
        Self { spi, dc, reset }
    }

    /// Give back the bus and control lines
    pub fn release(self) -> (S, DC, RST) {
        (self.spi, self.dc, self.reset)
    }
}

impl<S, DC, RST> Transport for FourWireSpi<S, DC, RST>
where
    S: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
{
    type Config = FourWireSpiConfig;

    fn init<D: DelayNs>(
        &mut self,
        config: &FourWireSpiConfig,
        delay: &mut D,
    ) -> Result<(), DisplayError> {
        config.validate()?;
        self.dc.init(config.dc)?;
        self.reset.init(config.reset)?;
        self.spi.init(&config.spi)?;
        pulse_reset(&mut self.reset, delay);
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> Result<(), HalError> {
        self.dc.set_low();
        self.spi.blocking_transmit(&[command])
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), HalError> {
        self.dc.set_high();
        self.spi.blocking_transmit(data)
    }
}

/// Control byte announcing a command
const I2C_CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing display data
const I2C_CONTROL_DATA: u8 = 0x40;

/// Data bytes carried by one I2C write
pub const I2C_CHUNK_LEN: usize = 64;

/// I2C transport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct I2cTransportConfig {
    /// Bus configuration
    pub i2c: I2cConfig,
    /// 7-bit device address
    pub address: u8,
    /// Reset line (active low)
    pub reset: Pin,
}

impl Default for I2cTransportConfig {
    fn default() -> Self {
        Self {
            i2c: I2cConfig::FAST,
            address: 0x3C,
            reset: Pin::new(Port::B, 15),
        }
    }
}

impl I2cTransportConfig {
    pub fn builder() -> I2cTransportConfigBuilder {
        I2cTransportConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the address and that SCL, SDA and RESET are distinct
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > 0x7F {
            return Err(ConfigError::InvalidAddress(self.address));
        }
        self.claim_pins(&mut PinSet::new())
    }
}

impl ClaimPins for I2cTransportConfig {
    fn claim_pins(&self, pins: &mut PinSet) -> Result<(), ConfigError> {
        self.i2c.claim_pins(pins)?;
        pins.claim(self.reset)
    }
}

/// Builder for [`I2cTransportConfig`]
#[derive(Debug, Clone, Copy)]
pub struct I2cTransportConfigBuilder {
    config: I2cTransportConfig,
}

impl I2cTransportConfigBuilder {
    pub fn i2c(mut self, i2c: I2cConfig) -> Self {
        self.config.i2c = i2c;
        self
    }

    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    pub fn reset(mut self, pin: Pin) -> Self {
        self.config.reset = pin;
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidAddress`] if the address exceeds 7 bits
    /// - [`ConfigError::PinConflict`] if SCL, SDA and RESET overlap
    pub fn build(self) -> Result<I2cTransportConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// I2C transport
///
/// Each write starts with a control byte that tells the controller whether
/// the following bytes are commands or display data.
pub struct I2cTransport<B, RST> {
    i2c: B,
    reset: RST,
    address: u8,
}

impl<B, RST> I2cTransport<B, RST>
where
    B: I2cBus,
    RST: OutputPin,
{
    /// Wrap the bus and reset line; nothing is configured until `init`
    pub fn new(i2c: B, reset: RST) -> Self {
        Self {
            i2c,
            reset,
            address: I2cTransportConfig::default().address,
        }
    }

    pub fn release(self) -> (B, RST) {
        (self.i2c, self.reset)
    }
}

impl<B, RST> Transport for I2cTransport<B, RST>
where
    B: I2cBus,
    RST: OutputPin,
{
    type Config = I2cTransportConfig;

    fn init<D: DelayNs>(
        &mut self,
        config: &I2cTransportConfig,
        delay: &mut D,
    ) -> Result<(), DisplayError> {
        config.validate()?;
        self.reset.init(config.reset)?;
        self.i2c.init(&config.i2c)?;
        self.address = config.address;
        pulse_reset(&mut self.reset, delay);
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> Result<(), HalError> {
        self.i2c
            .write(self.address, &[I2C_CONTROL_COMMAND, command])
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), HalError> {
        let mut frame = [0u8; I2C_CHUNK_LEN + 1];
        frame[0] = I2C_CONTROL_DATA;
        for chunk in data.chunks(I2C_CHUNK_LEN) {
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &frame[..=chunk.len()])?;
        }
        Ok(())
    }
}
