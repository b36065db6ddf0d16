//! Board-level errors

use core::fmt;

use dspboard_display::DisplayError;
use dspboard_hal::{ConfigError, HalError, Pin};

/// Errors raised while bringing up or running the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// A hardware capability failed
    Hal(HalError),
    /// Display bring-up or refresh failed
    Display(DisplayError),
    /// Two board functions were assigned the same pin
    PinConflict(Pin),
    /// Board pin map rejected for another reason
    Config(ConfigError),
}

impl From<HalError> for BoardError {
    fn from(e: HalError) -> Self {
        BoardError::Hal(e)
    }
}

impl From<DisplayError> for BoardError {
    fn from(e: DisplayError) -> Self {
        BoardError::Display(e)
    }
}

impl From<ConfigError> for BoardError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::PinConflict(pin) => BoardError::PinConflict(pin),
            other => BoardError::Config(other),
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Hal(e) => write!(f, "hardware: {e}"),
            BoardError::Display(e) => write!(f, "display: {e}"),
            BoardError::PinConflict(pin) => write!(f, "pin {pin} assigned twice"),
            BoardError::Config(e) => write!(f, "pin map: {e}"),
        }
    }
}

impl core::error::Error for BoardError {}
