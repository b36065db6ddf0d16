//! Recording test doubles for buses, pins and delays

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use dspboard_hal::gpio::{OutputPin, Pin};
use dspboard_hal::i2c::{I2cBus, I2cConfig};
use dspboard_hal::spi::{SpiBus, SpiConfig};
use dspboard_hal::HalError;

use crate::error::DisplayError;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PinInit(&'static str, Pin),
    Level(&'static str, bool),
    SpiInit,
    Spi(Vec<u8>),
    I2cInit,
    I2c(u8, Vec<u8>),
    DelayMs(u32),
    TransportInit,
    Command(u8),
    Data(Vec<u8>),
}

/// Shared, ordered log of everything the doubles observed
#[derive(Debug, Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Only the command and data frames, in order
    pub fn frames(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Command(_) | Event::Data(_)))
            .collect()
    }

    /// Concatenation of every data frame
    pub fn data_bytes(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Data(bytes) => Some(bytes),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

pub struct MockPin {
    name: &'static str,
    trace: Trace,
    high: bool,
}

impl MockPin {
    pub fn new(name: &'static str, trace: &Trace) -> Self {
        Self {
            name,
            trace: trace.clone(),
            high: false,
        }
    }
}

impl OutputPin for MockPin {
    fn init(&mut self, pin: Pin) -> Result<(), HalError> {
        self.trace.push(Event::PinInit(self.name, pin));
        Ok(())
    }

    fn set_high(&mut self) {
        self.high = true;
        self.trace.push(Event::Level(self.name, true));
    }

    fn set_low(&mut self) {
        self.high = false;
        self.trace.push(Event::Level(self.name, false));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

pub struct MockSpi {
    trace: Trace,
    busy: bool,
    fail_after: Option<usize>,
    transfers: usize,
}

impl MockSpi {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            busy: false,
            fail_after: None,
            transfers: 0,
        }
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Fail every transfer after the first `n` succeed
    pub fn fail_after(&mut self, n: usize) {
        self.fail_after = Some(n);
    }
}

impl SpiBus for MockSpi {
    fn init(&mut self, _config: &SpiConfig) -> Result<(), HalError> {
        if self.busy {
            return Err(HalError::PeripheralBusy);
        }
        self.trace.push(Event::SpiInit);
        Ok(())
    }

    fn blocking_transmit(&mut self, data: &[u8]) -> Result<(), HalError> {
        if self.fail_after.is_some_and(|n| self.transfers >= n) {
            return Err(HalError::Bus);
        }
        self.transfers += 1;
        self.trace.push(Event::Spi(data.to_vec()));
        Ok(())
    }
}

pub struct MockI2c {
    trace: Trace,
}

impl MockI2c {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl I2cBus for MockI2c {
    fn init(&mut self, _config: &I2cConfig) -> Result<(), HalError> {
        self.trace.push(Event::I2cInit);
        Ok(())
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), HalError> {
        self.trace.push(Event::I2c(address, data.to_vec()));
        Ok(())
    }
}

pub struct MockDelay {
    trace: Trace,
}

impl MockDelay {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.trace.push(Event::DelayMs(ms));
    }
}

/// Transport that records frames instead of driving a bus
pub struct RecordingTransport {
    trace: Trace,
    fail_after: Option<usize>,
    frames: usize,
}

impl RecordingTransport {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            fail_after: None,
            frames: 0,
        }
    }

    /// Fail every frame after the first `n` succeed
    pub fn fail_after(&mut self, n: usize) {
        self.fail_after = Some(n);
    }

    fn record(&mut self, event: Event) -> Result<(), HalError> {
        if self.fail_after.is_some_and(|n| self.frames >= n) {
            return Err(HalError::Bus);
        }
        self.frames += 1;
        self.trace.push(event);
        Ok(())
    }
}

impl Transport for RecordingTransport {
    type Config = ();

    fn init<D: DelayNs>(&mut self, _config: &(), _delay: &mut D) -> Result<(), DisplayError> {
        self.trace.push(Event::TransportInit);
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> Result<(), HalError> {
        self.record(Event::Command(command))
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), HalError> {
        self.record(Event::Data(data.to_vec()))
    }
}
