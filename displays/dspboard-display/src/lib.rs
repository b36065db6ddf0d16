//! OLED display transports and drivers for dspboard
//!
//! This crate provides:
//! - [`Transport`] trait framing command and data bytes for a controller,
//!   with 4-wire SPI and I2C implementations
//! - [`DisplayDriver`] trait, the pixel-level contract renderers use
//!   without knowing the controller or its pixel encoding
//! - SSD1327 (4-bit grayscale) and SSD1351 (16-bit RGB) drivers
//! - Controller bring-up sequences as data tables
//!
//! # Architecture
//!
//! ```text
//! renderer ──► DisplayDriver ──► Transport ──► SpiBus / I2cBus
//!              (framebuffer)     (DC + RESET)
//! ```
//!
//! The driver is written once against [`Transport`] and monomorphized per
//! concrete bus; the binding is fixed per board so there is no dynamic
//! dispatch.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod commands;
pub mod driver;
pub mod error;
pub mod packing;
pub mod ssd1327;
pub mod ssd1351;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

// Re-export key types
pub use driver::{DisplayDriver, DriverConfig};
pub use error::DisplayError;
pub use ssd1327::{Ssd1327Driver, Ssd1327Spi128x128};
pub use ssd1351::{Ssd1351Driver, Ssd1351Spi128x128};
pub use transport::{FourWireSpi, FourWireSpiConfig, I2cTransport, I2cTransportConfig, Transport};
