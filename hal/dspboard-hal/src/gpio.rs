//! GPIO pin abstractions
//!
//! Provides the pin reference type shared by configuration records and the
//! traits for digital input and output lines that chip-specific HALs
//! implement.

use core::fmt;

use heapless::FnvIndexSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, HalError};

/// GPIO port letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    /// Not connected
    X,
}

impl Port {
    fn letter(self) -> char {
        match self {
            Port::A => 'A',
            Port::B => 'B',
            Port::C => 'C',
            Port::D => 'D',
            Port::E => 'E',
            Port::F => 'F',
            Port::G => 'G',
            Port::H => 'H',
            Port::I => 'I',
            Port::J => 'J',
            Port::K => 'K',
            Port::X => 'X',
        }
    }
}

/// Reference to a physical signal line
///
/// Pins are plain values: several configuration records may name the same
/// line (a shared bus clock, for instance). Ownership of the line itself
/// belongs to whichever driver initializes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pin {
    /// Port letter
    pub port: Port,
    /// Line index within the port (0-15)
    pub index: u8,
}

impl Pin {
    /// A line that is not connected
    pub const NONE: Pin = Pin::new(Port::X, 0);

    /// Create a new pin reference
    pub const fn new(port: Port, index: u8) -> Self {
        Self { port, index }
    }

    /// Check if this reference names a real line
    pub const fn is_connected(&self) -> bool {
        !matches!(self.port, Port::X)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_connected() {
            write!(f, "P{}{}", self.port.letter(), self.index)
        } else {
            write!(f, "unconnected")
        }
    }
}

/// Maximum number of pins a [`PinSet`] can track
pub const MAX_CLAIMED_PINS: usize = 64;

/// Set of claimed pins
///
/// Used while building configurations to reject two functions sharing one
/// physical line.
#[derive(Debug, Default)]
pub struct PinSet {
    claimed: FnvIndexSet<Pin, MAX_CLAIMED_PINS>,
}

impl PinSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a pin
    ///
    /// Unconnected pins are ignored. Returns
    /// [`ConfigError::PinConflict`] if the pin was already claimed.
    pub fn claim(&mut self, pin: Pin) -> Result<(), ConfigError> {
        if !pin.is_connected() {
            return Ok(());
        }
        match self.claimed.insert(pin) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ConfigError::PinConflict(pin)),
            Err(_) => Err(ConfigError::TooManyPins),
        }
    }

    /// Claim every pin in the slice, stopping at the first conflict
    pub fn claim_all(&mut self, pins: &[Pin]) -> Result<(), ConfigError> {
        pins.iter().try_for_each(|&pin| self.claim(pin))
    }

    /// Check if a pin is claimed
    pub fn contains(&self, pin: Pin) -> bool {
        self.claimed.contains(&pin)
    }

    /// Number of claimed pins
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Check if no pin is claimed
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// Configuration that occupies physical pins
///
/// Claiming several configurations into one [`PinSet`] rejects any line
/// shared between the peripherals they describe.
pub trait ClaimPins {
    /// Claim every connected pin this configuration uses
    fn claim_pins(&self, pins: &mut PinSet) -> Result<(), ConfigError>;
}

/// Configuration with no pins of its own
impl ClaimPins for () {
    fn claim_pins(&self, _pins: &mut PinSet) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Input pull resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pull {
    #[default]
    None,
    Up,
    Down,
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Configure the line as a push-pull output
    fn init(&mut self, pin: Pin) -> Result<(), HalError>;

    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Configure the line as an input with the given pull resistor
    fn init(&mut self, pin: Pin, pull: Pull) -> Result<(), HalError>;

    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PB4: Pin = Pin::new(Port::B, 4);
    const PB15: Pin = Pin::new(Port::B, 15);

    #[test]
    fn test_pin_display() {
        assert_eq!(std::format!("{PB4}"), "PB4");
        assert_eq!(std::format!("{}", Pin::NONE), "unconnected");
    }

    #[test]
    fn test_pin_set_conflict() {
        let mut set = PinSet::new();
        assert!(set.claim(PB4).is_ok());
        assert!(set.claim(PB15).is_ok());
        assert_eq!(set.claim(PB4), Err(ConfigError::PinConflict(PB4)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_pin_set_ignores_unconnected() {
        let mut set = PinSet::new();
        assert!(set.claim_all(&[Pin::NONE, Pin::NONE, PB4]).is_ok());
        assert_eq!(set.len(), 1);
        assert!(!set.contains(Pin::NONE));
    }

    struct Lines(&'static [Pin]);

    impl ClaimPins for Lines {
        fn claim_pins(&self, pins: &mut PinSet) -> Result<(), ConfigError> {
            pins.claim_all(self.0)
        }
    }

    #[test]
    fn test_claims_across_configurations() {
        let mut pins = PinSet::new();
        Lines(&[PB4]).claim_pins(&mut pins).unwrap();
        ().claim_pins(&mut pins).unwrap();
        assert_eq!(
            Lines(&[PB15, PB4]).claim_pins(&mut pins),
            Err(ConfigError::PinConflict(PB4))
        );
        assert!(pins.contains(PB15));
    }
}
