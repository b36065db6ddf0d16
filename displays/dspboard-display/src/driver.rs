//! Display driver trait
//!
//! Defines the pixel-level contract shared by every controller.

use embedded_hal::delay::DelayNs;

use dspboard_hal::{ClaimPins, ConfigError, PinSet};

use crate::error::DisplayError;

/// Driver configuration
///
/// Geometry is fixed by the driver type, so the only runtime input is the
/// transport configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig<C> {
    pub transport: C,
}

impl<C> DriverConfig<C> {
    pub const fn new(transport: C) -> Self {
        Self { transport }
    }
}

impl<C: ClaimPins> ClaimPins for DriverConfig<C> {
    fn claim_pins(&self, pins: &mut PinSet) -> Result<(), ConfigError> {
        self.transport.claim_pins(pins)
    }
}

/// Framebuffer display driver
///
/// Callers address pixels without knowledge of the controller or the
/// pixel encoding. Drawing only touches the in-memory framebuffer;
/// [`update`](Self::update) is the only operation that talks to the bus.
pub trait DisplayDriver {
    /// Driver configuration
    ///
    /// Board code claims its pins alongside other peripherals before `init`.
    type Config: ClaimPins;

    /// Bring up the transport and controller, then clear the framebuffer
    ///
    /// Calling `init` again repeats the bring-up and discards anything
    /// drawn so far.
    fn init<D: DelayNs>(&mut self, config: &Self::Config, delay: &mut D)
        -> Result<(), DisplayError>;

    /// Width in pixels
    fn width(&self) -> usize;

    /// Height in pixels
    fn height(&self) -> usize;

    /// Set one pixel to the foreground (`on`) or background tone
    ///
    /// Coordinates outside the panel are ignored.
    fn draw_pixel(&mut self, x: usize, y: usize, on: bool);

    /// Set every pixel to the foreground (`on`) or background pattern
    fn fill(&mut self, on: bool);

    /// Send the whole framebuffer to the panel
    ///
    /// Blocks until the transfer completes. A transport fault aborts the
    /// frame and is returned to the caller.
    fn update(&mut self) -> Result<(), DisplayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FourWireSpiConfig;
    use dspboard_hal::pins::seed;

    #[test]
    fn test_config_claims_transport_pins() {
        let mut pins = PinSet::new();
        DriverConfig::new(FourWireSpiConfig::default())
            .claim_pins(&mut pins)
            .unwrap();
        assert!(pins.contains(seed::D9));
        assert!(pins.contains(seed::D30));
        assert_eq!(
            pins.claim(seed::D9),
            Err(ConfigError::PinConflict(seed::D9))
        );
    }
}
