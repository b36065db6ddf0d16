//! Board orchestration for the dspboard audio platform
//!
//! This crate ties the hardware capabilities and a display driver into one
//! board object:
//!
//! - Smoothed analog control channels fed from the ADC
//! - Quadrature encoder with a debounced push switch
//! - Rate-limited control-bar rendering on the OLED
//! - Audio lifecycle passthroughs that keep control smoothing in step with
//!   the audio callback rate
//!
//! Nothing here may run inside the audio callback: every display transfer
//! blocks on the bus. Call [`Board::process_all_controls`] and
//! [`Board::display_controls`] from the main loop.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod board;
pub mod control;
pub mod encoder;
pub mod error;

#[cfg(test)]
pub(crate) mod mock;

pub use board::{Board, BoardPins, Ctrl, CTRL_COUNT};
pub use control::AnalogControl;
pub use encoder::{EncoderInput, EncoderPins, QuadratureEncoder};
pub use error::BoardError;
