//! Audio substrate abstractions
//!
//! The audio substrate runs the user callback in its own higher-priority
//! context. Nothing in the board support crates is called from inside that
//! callback; these methods are only used from the ordinary control loop.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::HalError;

/// Non-interleaved multichannel audio callback
///
/// Arguments are the input channels, the output channels and the number of
/// samples per channel in this block.
pub type AudioCallback = fn(&[&[f32]], &mut [&mut [f32]], usize);

/// Supported codec sample rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleRate {
    Khz8,
    Khz16,
    Khz32,
    #[default]
    Khz48,
    Khz96,
}

impl SampleRate {
    /// Sample rate in Hz
    pub const fn hz(self) -> f32 {
        match self {
            SampleRate::Khz8 => 8_000.0,
            SampleRate::Khz16 => 16_000.0,
            SampleRate::Khz32 => 32_000.0,
            SampleRate::Khz48 => 48_000.0,
            SampleRate::Khz96 => 96_000.0,
        }
    }
}

/// Audio callback lifecycle and rate management
pub trait AudioSubstrate {
    /// Bring up clocks, memory and the codec
    ///
    /// `boost` selects the higher CPU clock where the chip supports it.
    fn init(&mut self, boost: bool) -> Result<(), HalError>;

    /// Start calling `callback` once per audio block
    fn start_audio(&mut self, callback: AudioCallback);

    /// Swap the running callback
    fn change_audio_callback(&mut self, callback: AudioCallback);

    /// Stop the audio callback
    fn stop_audio(&mut self);

    /// Change the codec sample rate
    fn set_sample_rate(&mut self, rate: SampleRate);

    /// Current sample rate in Hz
    fn sample_rate(&self) -> f32;

    /// Change the number of samples per channel in a block
    fn set_block_size(&mut self, size: usize);

    /// Samples per channel in a block
    fn block_size(&self) -> usize;

    /// Rate in Hz at which the audio callback runs
    fn callback_rate(&self) -> f32 {
        self.sample_rate() / self.block_size().max(1) as f32
    }
}
