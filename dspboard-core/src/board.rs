//! Board orchestrator
//!
//! [`Board`] owns the processor module, the display and the encoder, and runs
//! the cooperative housekeeping the main loop calls between audio blocks:
//! control smoothing, encoder debounce and a rate-limited display refresh.
//!
//! # Bring-up order
//!
//! ```text
//! audio substrate ──► encoder ──► display ──► analog controls
//! ```
//!
//! Controls come last because their smoothing depends on the audio callback
//! rate, which is only known once the substrate is configured.

use dspboard_display::DisplayDriver;
use dspboard_hal::pins::seed;
use dspboard_hal::{
    AdcChannelConfig, AdcHandle, AudioCallback, ClaimPins, ConfigError, Pin, PinSet, SampleRate,
    Seed,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::control::AnalogControl;
use crate::encoder::{EncoderInput, EncoderPins};
use crate::error::BoardError;

/// Number of analog control channels
pub const CTRL_COUNT: usize = 4;

/// Minimum time between display refreshes (~60 Hz)
pub const SCREEN_UPDATE_PERIOD_MS: u32 = 17;

/// Width of one control bar in pixels
pub const BAR_WIDTH: usize = 15;
/// Gap between adjacent bars
pub const BAR_SPACING: usize = 20;
/// Column of the first bar's left edge
pub const BAR_FIRST_COLUMN: usize = 1;

/// Analog control channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Ctrl {
    Ctrl1,
    Ctrl2,
    Ctrl3,
    Ctrl4,
}

impl Ctrl {
    pub const ALL: [Ctrl; CTRL_COUNT] = [Ctrl::Ctrl1, Ctrl::Ctrl2, Ctrl::Ctrl3, Ctrl::Ctrl4];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Board pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardPins {
    pub encoder: EncoderPins,
    /// ADC input per control, in [`Ctrl`] order
    pub controls: [Pin; CTRL_COUNT],
}

impl Default for BoardPins {
    fn default() -> Self {
        Self {
            encoder: EncoderPins::default(),
            controls: [seed::D15, seed::D16, seed::D21, seed::D18],
        }
    }
}

impl BoardPins {
    /// Reject maps where one pin serves two functions
    pub fn validate(&self) -> Result<(), BoardError> {
        self.claim_pins(&mut PinSet::new())?;
        Ok(())
    }
}

impl ClaimPins for BoardPins {
    fn claim_pins(&self, pins: &mut PinSet) -> Result<(), ConfigError> {
        self.encoder.claim_pins(pins)?;
        pins.claim_all(&self.controls)
    }
}

/// Height in pixels of the bar drawn for `value`, rounded to nearest
pub fn bar_height(value: f32, height: usize) -> usize {
    // Exact in f64 for any f32 value and panel height, so truncating after
    // +0.5 rounds half up
    let scaled = f64::from(value.clamp(0.0, 1.0)) * height as f64 + 0.5;
    (scaled as usize).min(height)
}

/// Left column of the bar for control `index`
pub const fn bar_column(index: usize) -> usize {
    index * (BAR_WIDTH + BAR_SPACING) + BAR_FIRST_COLUMN
}

/// Audio board with encoder, four knobs and an OLED
pub struct Board<S, D, E>
where
    S: Seed,
    D: DisplayDriver,
{
    seed: S,
    display: D,
    encoder: E,
    display_config: D::Config,
    pins: BoardPins,
    controls: [AnalogControl; CTRL_COUNT],
    screen_update_last: u32,
    screen_update_period: u32,
}

impl<S, D, E> Board<S, D, E>
where
    S: Seed,
    D: DisplayDriver,
    E: EncoderInput,
{
    /// Assemble a board; no hardware is touched until [`init`](Self::init)
    pub fn new(seed: S, display: D, encoder: E, display_config: D::Config) -> Self {
        let rate = seed.callback_rate();
        Self {
            seed,
            display,
            encoder,
            display_config,
            pins: BoardPins::default(),
            controls: core::array::from_fn(|i| AnalogControl::new(i, rate, true)),
            screen_update_last: 0,
            screen_update_period: SCREEN_UPDATE_PERIOD_MS,
        }
    }

    /// Replace the default pin map
    pub fn with_pins(mut self, pins: BoardPins) -> Self {
        self.pins = pins;
        self
    }

    /// Bring up audio, encoder, display and controls, in that order
    ///
    /// The board pins and the display's bus and control lines are checked
    /// against each other first; a shared pin fails before any hardware is
    /// touched.
    pub fn init(&mut self, boost: bool) -> Result<(), BoardError> {
        let mut claimed = PinSet::new();
        self.pins.claim_pins(&mut claimed)?;
        self.display_config.claim_pins(&mut claimed)?;

        self.seed.init(boost)?;
        self.encoder.init(&self.pins.encoder)?;
        self.display.init(&self.display_config, &mut self.seed)?;
        self.init_controls()?;

        self.screen_update_period = SCREEN_UPDATE_PERIOD_MS;
        self.screen_update_last = self.seed.now_ms();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Board ready, control rate {} Hz",
            self.seed.callback_rate()
        );
        Ok(())
    }

    fn init_controls(&mut self) -> Result<(), BoardError> {
        let channels = self.pins.controls.map(AdcChannelConfig::single);
        self.seed.adc_mut().init(&channels)?;

        let rate = self.seed.callback_rate();
        self.controls = core::array::from_fn(|i| AnalogControl::new(i, rate, true));
        Ok(())
    }

    /// Block for `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.seed.delay_ms(ms);
    }

    pub fn start_audio(&mut self, callback: AudioCallback) {
        self.seed.start_audio(callback);
    }

    pub fn change_audio_callback(&mut self, callback: AudioCallback) {
        self.seed.change_audio_callback(callback);
    }

    pub fn stop_audio(&mut self) {
        self.seed.stop_audio();
    }

    /// Change the sample rate and retune every control to the new callback rate
    pub fn set_audio_sample_rate(&mut self, rate: SampleRate) {
        self.seed.set_sample_rate(rate);
        self.retune_controls();
    }

    /// Change the block size and retune every control to the new callback rate
    pub fn set_audio_block_size(&mut self, size: usize) {
        self.seed.set_block_size(size);
        self.retune_controls();
    }

    pub fn audio_sample_rate(&self) -> f32 {
        self.seed.sample_rate()
    }

    pub fn audio_block_size(&self) -> usize {
        self.seed.block_size()
    }

    /// Audio callbacks per second
    pub fn audio_callback_rate(&self) -> f32 {
        self.seed.callback_rate()
    }

    fn retune_controls(&mut self) {
        let rate = self.seed.callback_rate();
        for control in &mut self.controls {
            control.set_update_rate(rate);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("Controls retuned to {} Hz", rate);
    }

    pub fn start_adc(&mut self) {
        self.seed.adc_mut().start();
    }

    pub fn stop_adc(&mut self) {
        self.seed.adc_mut().stop();
    }

    /// Advance every control's smoothing by one step
    ///
    /// Call once per audio block so the slew time holds.
    pub fn process_analog_controls(&mut self) {
        let adc = self.seed.adc();
        for control in &mut self.controls {
            control.process(adc.raw(control.channel()));
        }
    }

    /// Advance the encoder debounce by one tick
    pub fn process_digital_controls(&mut self) {
        let now = self.seed.now_ms();
        self.encoder.debounce(now);
    }

    pub fn process_all_controls(&mut self) {
        self.process_analog_controls();
        self.process_digital_controls();
    }

    /// Smoothed value of a control (0..1)
    pub fn knob_value(&self, ctrl: Ctrl) -> f32 {
        self.controls[ctrl.index()].value()
    }

    /// Smoothed value by index, `None` past the last control
    pub fn knob_value_at(&self, index: usize) -> Option<f32> {
        self.controls.get(index).map(AnalogControl::value)
    }

    pub fn control(&self, ctrl: Ctrl) -> &AnalogControl {
        &self.controls[ctrl.index()]
    }

    /// Draw one bar per control and flush, at most once per refresh period
    ///
    /// Returns `Ok(true)` when a frame was sent. With `invert` the bars are
    /// drawn in the "off" tone on an "on" background. A failed flush leaves
    /// the refresh mark untouched so the next call retries.
    pub fn display_controls(&mut self, invert: bool) -> Result<bool, BoardError> {
        let now = self.seed.now_ms();
        if now.wrapping_sub(self.screen_update_last) <= self.screen_update_period {
            return Ok(false);
        }

        let on = !invert;
        let height = self.display.height();
        self.display.fill(!on);
        for (i, control) in self.controls.iter().enumerate() {
            let left = bar_column(i);
            let top = height - bar_height(control.value(), height);
            for x in left..left + BAR_WIDTH {
                for y in top..height {
                    self.display.draw_pixel(x, y, on);
                }
            }
        }
        self.display.update()?;
        self.screen_update_last = now;

        #[cfg(feature = "defmt")]
        defmt::trace!("Display refreshed at {} ms", now);
        Ok(true)
    }

    pub fn screen_update_period(&self) -> u32 {
        self.screen_update_period
    }

    pub fn set_screen_update_period(&mut self, period_ms: u32) {
        self.screen_update_period = period_ms;
    }

    pub fn pins(&self) -> &BoardPins {
        &self.pins
    }

    pub fn seed(&self) -> &S {
        &self.seed
    }

    pub fn seed_mut(&mut self) -> &mut S {
        &mut self.seed
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }
}
