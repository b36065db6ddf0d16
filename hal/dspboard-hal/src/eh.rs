//! embedded-hal adapters
//!
//! Chip HALs that already implement embedded-hal 1.0 construct their pins
//! and buses up front. These wrappers let such peripherals stand in for
//! the capabilities in this crate: `init` records the requested pin or
//! configuration, and transfers forward to the wrapped peripheral.

use embedded_hal::digital;
use embedded_hal::spi;

use crate::error::HalError;
use crate::gpio::{InputPin, OutputPin, Pin, Pull};
use crate::spi::{SpiBus, SpiConfig};

/// Output line backed by an embedded-hal output pin
///
/// Pin errors are dropped; on-chip GPIO is infallible in practice.
pub struct EhOutput<P> {
    inner: P,
    pin: Pin,
    high: bool,
}

impl<P: digital::OutputPin> EhOutput<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            pin: Pin::NONE,
            high: false,
        }
    }

    /// Pin recorded by the last `init`
    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn release(self) -> P {
        self.inner
    }
}

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn init(&mut self, pin: Pin) -> Result<(), HalError> {
        self.pin = pin;
        Ok(())
    }

    fn set_high(&mut self) {
        let _ = self.inner.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.inner.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input line backed by an embedded-hal input pin
///
/// A read error reports the line as high (idle for pulled-up inputs).
pub struct EhInput<P> {
    inner: P,
    pin: Pin,
}

impl<P: digital::InputPin> EhInput<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            pin: Pin::NONE,
        }
    }

    /// Pin recorded by the last `init`
    pub fn pin(&self) -> Pin {
        self.pin
    }
}

impl<P: digital::InputPin> InputPin for EhInput<P> {
    fn init(&mut self, pin: Pin, _pull: Pull) -> Result<(), HalError> {
        self.pin = pin;
        Ok(())
    }

    fn is_high(&mut self) -> bool {
        self.inner.is_high().unwrap_or(true)
    }
}

/// SPI bus backed by an embedded-hal SPI bus
pub struct EhSpi<B> {
    inner: B,
    config: Option<SpiConfig>,
}

impl<B: spi::SpiBus<u8>> EhSpi<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            config: None,
        }
    }

    /// Configuration recorded by the last `init`
    pub fn config(&self) -> Option<&SpiConfig> {
        self.config.as_ref()
    }
}

impl<B: spi::SpiBus<u8>> SpiBus for EhSpi<B> {
    fn init(&mut self, config: &SpiConfig) -> Result<(), HalError> {
        self.config = Some(*config);
        Ok(())
    }

    fn blocking_transmit(&mut self, data: &[u8]) -> Result<(), HalError> {
        self.inner.write(data).map_err(|_| HalError::Bus)?;
        self.inner.flush().map_err(|_| HalError::Bus)
    }
}
