//! Analog sampling abstractions
//!
//! The ADC samples every configured channel continuously in the
//! background once started; readers fetch the latest raw conversion.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::HalError;
use crate::gpio::Pin;

/// Maximum channels a board configures
pub const MAX_ADC_CHANNELS: usize = 16;

/// Per-channel conversion speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConversionSpeed {
    Fast,
    #[default]
    Medium,
    Slow,
}

/// Configuration for one ADC channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdcChannelConfig {
    /// Analog input line
    pub pin: Pin,
    /// Sample time
    pub speed: ConversionSpeed,
}

impl AdcChannelConfig {
    /// A single-ended channel on `pin`
    pub const fn single(pin: Pin) -> Self {
        Self {
            pin,
            speed: ConversionSpeed::Medium,
        }
    }
}

/// Multi-channel ADC
pub trait AdcHandle {
    /// Configure the channels, in order
    ///
    /// Channel `i` of [`raw`](Self::raw) refers to `channels[i]`.
    fn init(&mut self, channels: &[AdcChannelConfig]) -> Result<(), HalError>;

    /// Start background conversions
    fn start(&mut self);

    /// Stop background conversions
    fn stop(&mut self);

    /// Number of configured channels
    fn channel_count(&self) -> usize;

    /// Latest raw 16-bit conversion for a channel
    ///
    /// Returns 0 for a channel that was never configured.
    fn raw(&self, channel: usize) -> u16;

    /// Latest conversion normalized to 0.0-1.0
    fn normalized(&self, channel: usize) -> f32 {
        f32::from(self.raw(channel)) / 65_536.0
    }
}
