//! Display error type

use core::fmt;

use dspboard_hal::{ConfigError, HalError};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus or control line fault
    Transport(HalError),
    /// Invalid transport configuration
    Config(ConfigError),
    /// Frame transfer requested before `init`
    NotInitialized,
}

impl From<HalError> for DisplayError {
    fn from(err: HalError) -> Self {
        DisplayError::Transport(err)
    }
}

impl From<ConfigError> for DisplayError {
    fn from(err: ConfigError) -> Self {
        DisplayError::Config(err)
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Transport(e) => write!(f, "transport error: {e}"),
            DisplayError::Config(e) => write!(f, "configuration error: {e}"),
            DisplayError::NotInitialized => write!(f, "display not initialized"),
        }
    }
}

impl core::error::Error for DisplayError {}
