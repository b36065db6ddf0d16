//! SSD1327 OLED Display Driver
//!
//! Driver for SSD1327-based 4-bit grayscale OLED panels. The framebuffer
//! packs two pixels per byte (see [`crate::packing`]).
//!
//! `fill` works on whole bytes, so after `fill(true)` both nibbles of every
//! byte hold the full level regardless of [`set_color`](Ssd1327Driver::set_color).

use embedded_hal::delay::DelayNs;

use dspboard_hal::HalError;

use crate::commands::{self, Window, ssd1327 as cmd};
use crate::driver::{DisplayDriver, DriverConfig};
use crate::error::DisplayError;
use crate::packing::{self, Gray4, GRAY4_MAX};
use crate::transport::{FourWireSpi, Transport};

/// SSD1327 128x128 panel on a 4-wire SPI bus
pub type Ssd1327Spi128x128<S, DC, RST> =
    Ssd1327Driver<FourWireSpi<S, DC, RST>, 128, 128, { packing::buffer_len(128, 128) }>;

/// SSD1327 driver
///
/// `BYTES` must equal [`packing::buffer_len`]`(W, H)`; a mismatch fails at
/// compile time when the driver is constructed.
pub struct Ssd1327Driver<T, const W: usize, const H: usize, const BYTES: usize> {
    transport: T,
    buffer: [u8; BYTES],
    color: u8,
    initialized: bool,
}

impl<T, const W: usize, const H: usize, const BYTES: usize> Ssd1327Driver<T, W, H, BYTES>
where
    T: Transport,
{
    const GEOMETRY: () = {
        assert!(W % 2 == 0, "SSD1327 rows are sent as whole bytes");
        assert!(W > 0 && W <= 128, "SSD1327 supports up to 128 columns");
        assert!(H > 0 && H <= 128, "SSD1327 supports up to 128 rows");
        assert!(BYTES == packing::buffer_len(W, H), "framebuffer size mismatch");
    };

    const WINDOW: Window = Window {
        last_column: (W / 2 - 1) as u8,
        last_row: (H - 1) as u8,
    };

    const PACKING: Gray4 = Gray4::new(W);

    /// Create a driver; the panel is untouched until `init`
    pub fn new(transport: T) -> Self {
        let () = Self::GEOMETRY;
        Self {
            transport,
            buffer: [0; BYTES],
            color: GRAY4_MAX,
            initialized: false,
        }
    }

    /// Set the gray level used for "on" pixels
    ///
    /// Only the low nibble is kept. Pixels already drawn keep their level.
    pub fn set_color(&mut self, level: u8) {
        self.color = level & GRAY4_MAX;
    }

    /// Current "on" gray level
    pub fn color(&self) -> u8 {
        self.color
    }

    /// Read back the gray level of a pixel
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= W || y >= H {
            return None;
        }
        Self::PACKING.read(&self.buffer, x, y)
    }

    /// Raw framebuffer bytes
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Set panel contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_CONTRAST, &[contrast])
    }

    /// Turn the panel on or off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF }, &[])
    }

    /// Invert display levels in hardware
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        let opcode = if inverted {
            cmd::INVERSE_DISPLAY
        } else {
            cmd::NORMAL_DISPLAY
        };
        self.command(opcode, &[])
    }

    pub fn release(self) -> T {
        self.transport
    }

    fn command(&mut self, opcode: u8, args: &[u8]) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        commands::send(&mut self.transport, cmd::FRAMING, opcode, args)?;
        Ok(())
    }

    fn send_frame(&mut self) -> Result<(), HalError> {
        commands::send(
            &mut self.transport,
            cmd::FRAMING,
            cmd::SET_COLUMN_ADDRESS,
            &[0x00, Self::WINDOW.last_column],
        )?;
        commands::send(
            &mut self.transport,
            cmd::FRAMING,
            cmd::SET_ROW_ADDRESS,
            &[0x00, Self::WINDOW.last_row],
        )?;
        for row in self.buffer.chunks(W / 2) {
            self.transport.send_data(row)?;
        }
        Ok(())
    }
}

impl<T, const W: usize, const H: usize, const BYTES: usize> DisplayDriver
    for Ssd1327Driver<T, W, H, BYTES>
where
    T: Transport,
{
    type Config = DriverConfig<T::Config>;

    fn init<D: DelayNs>(
        &mut self,
        config: &Self::Config,
        delay: &mut D,
    ) -> Result<(), DisplayError> {
        self.transport.init(&config.transport, delay)?;
        commands::run(
            &mut self.transport,
            cmd::FRAMING,
            cmd::INIT,
            Self::WINDOW,
            delay,
        )?;
        self.fill(false);
        self.initialized = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("SSD1327 {}x{} initialized", W, H);
        Ok(())
    }

    fn width(&self) -> usize {
        W
    }

    fn height(&self) -> usize {
        H
    }

    fn draw_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= W || y >= H {
            return;
        }
        let level = if on { self.color } else { 0 };
        Self::PACKING.write(&mut self.buffer, x, y, level);
    }

    fn fill(&mut self, on: bool) {
        self.buffer.fill(if on { 0xFF } else { 0x00 });
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.send_frame().map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("SSD1327 frame aborted: {}", e);
            DisplayError::from(e)
        })
    }
}
