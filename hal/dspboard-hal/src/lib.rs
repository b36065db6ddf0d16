//! dspboard Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the board support crates
//! consume. Chip-specific HALs implement these traits; the display drivers
//! and the board orchestrator are written once against them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dspboard-core (board orchestrator)     │
//! └─────────────────────────────────────────┘
//!            │                    │
//!            ▼                    ▼
//! ┌────────────────────┐          │
//! │  dspboard-display  │          │
//! └────────────────────┘          │
//!            │                    │
//!            ▼                    ▼
//! ┌─────────────────────────────────────────┐
//! │  dspboard-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SpiBus`] - Blocking SPI transmit
//! - [`i2c::I2cBus`] - Blocking I2C writes
//! - [`adc::AdcHandle`] - Multi-channel analog sampling
//! - [`audio::AudioSubstrate`] - Audio callback lifecycle
//! - [`clock::SystemClock`] - Monotonic time and blocking delays
//! - [`seed::Seed`] - The system module bundling audio, clock and ADC

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod adc;
pub mod audio;
pub mod clock;
pub mod eh;
pub mod error;
pub mod gpio;
pub mod i2c;
pub mod pins;
pub mod seed;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use adc::{AdcChannelConfig, AdcHandle};
pub use audio::{AudioCallback, AudioSubstrate, SampleRate};
pub use clock::SystemClock;
pub use error::{ConfigError, HalError};
pub use gpio::{ClaimPins, InputPin, OutputPin, Pin, PinSet, Port, Pull};
pub use i2c::{I2cBus, I2cConfig};
pub use seed::Seed;
pub use spi::{SpiBus, SpiConfig};
