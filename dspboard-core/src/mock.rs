//! Test doubles for the board's collaborators

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dspboard_display::{DisplayDriver, DisplayError, DriverConfig, FourWireSpiConfig};
use dspboard_hal::{
    AdcChannelConfig, AdcHandle, AudioCallback, AudioSubstrate, HalError, InputPin, Pin, Pull,
    SampleRate, Seed, SystemClock,
};
use embedded_hal::delay::DelayNs;

use crate::board::CTRL_COUNT;
use crate::encoder::{EncoderInput, EncoderPins};

/// Ordered record of calls across every double
#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<Vec<String>>>);

impl Log {
    pub fn push(&self, entry: &str) {
        self.0.borrow_mut().push(entry.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Input line whose level the test controls
#[derive(Debug, Clone)]
pub struct Line {
    level: Rc<Cell<bool>>,
    config: Rc<Cell<Option<(Pin, Pull)>>>,
}

impl Line {
    pub fn new(level: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(level)),
            config: Rc::new(Cell::new(None)),
        }
    }

    pub fn set(&self, level: bool) {
        self.level.set(level);
    }

    pub fn config(&self) -> Option<(Pin, Pull)> {
        self.config.get()
    }
}

impl InputPin for Line {
    fn init(&mut self, pin: Pin, pull: Pull) -> Result<(), HalError> {
        self.config.set(Some((pin, pull)));
        Ok(())
    }

    fn is_high(&mut self) -> bool {
        self.level.get()
    }
}

pub struct MockAdc {
    log: Log,
    pub raw: [u16; CTRL_COUNT],
    pub pins: [Pin; CTRL_COUNT],
}

impl AdcHandle for MockAdc {
    fn init(&mut self, channels: &[AdcChannelConfig]) -> Result<(), HalError> {
        self.log.push(&format!("adc.init({})", channels.len()));
        for (slot, channel) in self.pins.iter_mut().zip(channels) {
            *slot = channel.pin;
        }
        Ok(())
    }

    fn start(&mut self) {
        self.log.push("adc.start");
    }

    fn stop(&mut self) {
        self.log.push("adc.stop");
    }

    fn channel_count(&self) -> usize {
        CTRL_COUNT
    }

    fn raw(&self, channel: usize) -> u16 {
        self.log.push("adc.raw");
        self.raw.get(channel).copied().unwrap_or(0)
    }
}

/// Processor module with a hand-driven millisecond clock
pub struct MockSeed {
    log: Log,
    pub now: u32,
    pub fail_init: bool,
    pub adc: MockAdc,
    sample_rate: SampleRate,
    block_size: usize,
}

impl MockSeed {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            now: 0,
            fail_init: false,
            adc: MockAdc {
                log: log.clone(),
                raw: [0; CTRL_COUNT],
                pins: [Pin::NONE; CTRL_COUNT],
            },
            sample_rate: SampleRate::Khz48,
            block_size: 48,
        }
    }

    pub fn advance(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }
}

impl AudioSubstrate for MockSeed {
    fn init(&mut self, boost: bool) -> Result<(), HalError> {
        self.log.push(if boost { "seed.init(boost)" } else { "seed.init" });
        if self.fail_init {
            return Err(HalError::PeripheralBusy);
        }
        Ok(())
    }

    fn start_audio(&mut self, _callback: AudioCallback) {
        self.log.push("seed.start_audio");
    }

    fn change_audio_callback(&mut self, _callback: AudioCallback) {
        self.log.push("seed.change_audio_callback");
    }

    fn stop_audio(&mut self) {
        self.log.push("seed.stop_audio");
    }

    fn set_sample_rate(&mut self, rate: SampleRate) {
        self.sample_rate = rate;
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate.hz()
    }

    fn set_block_size(&mut self, size: usize) {
        self.block_size = size;
    }

    fn block_size(&self) -> usize {
        self.block_size
    }
}

impl DelayNs for MockSeed {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms);
    }
}

impl SystemClock for MockSeed {
    fn now_ms(&self) -> u32 {
        self.now
    }
}

impl Seed for MockSeed {
    type Adc = MockAdc;

    fn adc(&self) -> &MockAdc {
        &self.adc
    }

    fn adc_mut(&mut self) -> &mut MockAdc {
        &mut self.adc
    }
}

/// Display that keeps one bool per pixel
pub struct BufferDisplay {
    log: Log,
    width: usize,
    height: usize,
    pixels: Vec<bool>,
    pub updates: usize,
    pub fail_update: bool,
}

impl BufferDisplay {
    pub fn new(width: usize, height: usize, log: &Log) -> Self {
        Self {
            log: log.clone(),
            width,
            height,
            pixels: vec![false; width * height],
            updates: 0,
            fail_update: false,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }

    /// Number of lit pixels in column `x`
    pub fn column_height(&self, x: usize) -> usize {
        (0..self.height).filter(|&y| self.pixel(x, y)).count()
    }
}

impl DisplayDriver for BufferDisplay {
    type Config = DriverConfig<FourWireSpiConfig>;

    fn init<D: DelayNs>(
        &mut self,
        _config: &Self::Config,
        _delay: &mut D,
    ) -> Result<(), DisplayError> {
        self.log.push("display.init");
        self.fill(false);
        Ok(())
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn draw_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = on;
        }
    }

    fn fill(&mut self, on: bool) {
        self.pixels.fill(on);
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        if self.fail_update {
            return Err(DisplayError::Transport(HalError::Bus));
        }
        self.updates += 1;
        Ok(())
    }
}

pub struct MockEncoder {
    log: Log,
    ticks: u32,
}

impl MockEncoder {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            ticks: 0,
        }
    }
}

impl EncoderInput for MockEncoder {
    fn init(&mut self, _pins: &EncoderPins) -> Result<(), HalError> {
        self.log.push("encoder.init");
        Ok(())
    }

    fn debounce(&mut self, _now_ms: u32) {
        self.log.push("encoder.debounce");
        self.ticks += 1;
    }

    fn increment(&self) -> i32 {
        0
    }

    fn pressed(&self) -> bool {
        false
    }

    fn rising_edge(&self) -> bool {
        false
    }

    fn falling_edge(&self) -> bool {
        false
    }

    fn time_held_ms(&self) -> u32 {
        self.ticks
    }
}
