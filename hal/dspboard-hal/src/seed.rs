//! System module abstraction
//!
//! A seed is the processor module a board is built around: it owns the
//! audio codec, the system clock and the ADC.

use crate::adc::AdcHandle;
use crate::audio::AudioSubstrate;
use crate::clock::SystemClock;

/// Audio, clock and ADC bundled by the processor module
pub trait Seed: AudioSubstrate + SystemClock {
    /// ADC implementation
    type Adc: AdcHandle;

    /// Shared access to the ADC
    fn adc(&self) -> &Self::Adc;

    /// Exclusive access to the ADC
    fn adc_mut(&mut self) -> &mut Self::Adc;
}
