//! Analog control smoothing
//!
//! Each control turns raw 16-bit ADC readings into a 0..1 value with a
//! one-pole low-pass filter. The filter coefficient depends on how often
//! [`AnalogControl::process`] runs, so it must track the audio callback rate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default slew time in seconds
pub const DEFAULT_SLEW_SECONDS: f32 = 0.002;

/// One smoothed analog input
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalogControl {
    channel: usize,
    flip: bool,
    slew_seconds: f32,
    update_rate: f32,
    coeff: f32,
    value: f32,
}

impl AnalogControl {
    /// Create a control reading ADC `channel`, processed `update_rate` times
    /// per second
    ///
    /// With `flip` set the value runs 1..0 as the reading rises, for knobs
    /// wired in reverse.
    pub fn new(channel: usize, update_rate: f32, flip: bool) -> Self {
        let mut control = Self {
            channel,
            flip,
            slew_seconds: DEFAULT_SLEW_SECONDS,
            update_rate,
            coeff: 1.0,
            value: 0.0,
        };
        control.recompute();
        control
    }

    /// ADC channel this control reads
    pub fn channel(&self) -> usize {
        self.channel
    }

    pub fn is_flipped(&self) -> bool {
        self.flip
    }

    /// Feed one raw reading and return the smoothed value
    pub fn process(&mut self, raw: u16) -> f32 {
        let mut target = f32::from(raw) / 65_536.0;
        if self.flip {
            target = 1.0 - target;
        }
        self.value += self.coeff * (target - self.value);
        self.value
    }

    /// Latest smoothed value (0..1)
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Change how often `process` is called; takes effect on the next call
    pub fn set_update_rate(&mut self, update_rate: f32) {
        self.update_rate = update_rate;
        self.recompute();
    }

    pub fn update_rate(&self) -> f32 {
        self.update_rate
    }

    pub fn set_slew_seconds(&mut self, slew_seconds: f32) {
        self.slew_seconds = slew_seconds;
        self.recompute();
    }

    /// Per-step filter coefficient
    pub fn coefficient(&self) -> f32 {
        self.coeff
    }

    fn recompute(&mut self) {
        let steps = self.slew_seconds * self.update_rate * 0.5;
        // Slew shorter than one step means no smoothing at all
        self.coeff = if steps > 1.0 { 1.0 / steps } else { 1.0 };
    }
}
