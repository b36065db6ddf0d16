//! SSD1351 OLED Display Driver
//!
//! Driver for SSD1351-based 16-bit RGB565 OLED panels. Pixels are stored
//! big-endian so the framebuffer can be streamed as-is.

use embedded_hal::delay::DelayNs;

use dspboard_hal::HalError;

use crate::commands::{self, Window, ssd1351 as cmd};
use crate::driver::{DisplayDriver, DriverConfig};
use crate::error::DisplayError;
use crate::transport::{FourWireSpi, Transport};

/// SSD1351 128x128 panel on a 4-wire SPI bus
pub type Ssd1351Spi128x128<S, DC, RST> = Ssd1351Driver<FourWireSpi<S, DC, RST>, 128, 128>;

/// White in RGB565
pub const WHITE: u16 = 0xFFFF;
/// Black in RGB565
pub const BLACK: u16 = 0x0000;

/// SSD1351 driver
pub struct Ssd1351Driver<T, const W: usize, const H: usize> {
    transport: T,
    buffer: [[[u8; 2]; W]; H],
    fg: u16,
    bg: u16,
    initialized: bool,
}

impl<T, const W: usize, const H: usize> Ssd1351Driver<T, W, H>
where
    T: Transport,
{
    const GEOMETRY: () = {
        assert!(W > 0 && W <= 128, "SSD1351 supports up to 128 columns");
        assert!(H > 0 && H <= 128, "SSD1351 supports up to 128 rows");
    };

    const WINDOW: Window = Window {
        last_column: (W - 1) as u8,
        last_row: (H - 1) as u8,
    };

    pub fn new(transport: T) -> Self {
        let () = Self::GEOMETRY;
        Self {
            transport,
            buffer: [[BLACK.to_be_bytes(); W]; H],
            fg: WHITE,
            bg: BLACK,
            initialized: false,
        }
    }

    /// Color drawn for "on" pixels
    pub fn set_fg_color(&mut self, color: u16) {
        self.fg = color;
    }

    /// Color drawn for "off" pixels
    pub fn set_bg_color(&mut self, color: u16) {
        self.bg = color;
    }

    pub fn fg_color(&self) -> u16 {
        self.fg
    }

    pub fn bg_color(&self) -> u16 {
        self.bg
    }

    /// Read back a pixel's RGB565 value
    pub fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        self.buffer
            .get(y)
            .and_then(|row| row.get(x))
            .map(|&bytes| u16::from_be_bytes(bytes))
    }

    /// Framebuffer in wire order
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_flattened().as_flattened()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Set master contrast (0-15)
    pub fn set_contrast(&mut self, level: u8) -> Result<(), DisplayError> {
        self.command(cmd::MASTER_CONTRAST, &[level & 0x0F])
    }

    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF }, &[])
    }

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
        self.transport.send_command(cmd::WRITE_RAM)?;
        self.transport
            .send_data(self.buffer.as_flattened().as_flattened())
    }
}

impl<T, const W: usize, const H: usize> DisplayDriver for Ssd1351Driver<T, W, H>
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
        defmt::debug!("SSD1351 {}x{} initialized", W, H);
        Ok(())
    }

    fn width(&self) -> usize {
        W
    }

    fn height(&self) -> usize {
        H
    }

    fn draw_pixel(&mut self, x: usize, y: usize, on: bool) {
        let color = if on { self.fg } else { self.bg };
        if let Some(pixel) = self.buffer.get_mut(y).and_then(|row| row.get_mut(x)) {
            *pixel = color.to_be_bytes();
        }
    }

    fn fill(&mut self, on: bool) {
        let color = if on { self.fg } else { self.bg };
        self.buffer
            .as_flattened_mut()
            .fill(color.to_be_bytes());
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.send_frame().map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("SSD1351 frame aborted: {}", e);
            DisplayError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Event, MockDelay, RecordingTransport, Trace};
    use proptest::prelude::*;

    type Small = Ssd1351Driver<RecordingTransport, 4, 3>;

    fn ready(trace: &Trace) -> Small {
        let mut display = Small::new(RecordingTransport::new(trace));
        display
            .init(&DriverConfig::new(()), &mut MockDelay::new(trace))
            .unwrap();
        trace.clear();
        display
    }

    #[test]
    fn test_init_frames_arguments_as_data() {
        let trace = Trace::default();
        let mut display = Small::new(RecordingTransport::new(&trace));
        display
            .init(&DriverConfig::new(()), &mut MockDelay::new(&trace))
            .unwrap();

        let events = trace.events();
        assert_eq!(events[0], Event::TransportInit);
        assert_eq!(events[1], Event::Command(cmd::SET_COMMAND_LOCK));
        assert_eq!(events[2], Event::Data(vec![0x12]));
        assert_eq!(events.last(), Some(&Event::Command(cmd::DISPLAY_ON)));
        assert!(display.is_initialized());
    }

    #[test]
    fn test_init_sizes_window_and_mux_to_panel() {
        let trace = Trace::default();
        let mut display = Ssd1351Driver::<_, 128, 96>::new(RecordingTransport::new(&trace));
        display
            .init(&DriverConfig::new(()), &mut MockDelay::new(&trace))
            .unwrap();

        let frames = trace.frames();
        let sent = |expected: &[Event]| frames.windows(expected.len()).any(|w| w == expected);
        assert!(sent(&[
            Event::Command(cmd::SET_COLUMN_ADDRESS),
            Event::Data(vec![0x00]),
            Event::Data(vec![0x7F]),
        ]));
        assert!(sent(&[
            Event::Command(cmd::SET_ROW_ADDRESS),
            Event::Data(vec![0x00]),
            Event::Data(vec![0x5F]),
        ]));
        assert!(sent(&[Event::Command(cmd::SET_MUX_RATIO), Event::Data(vec![0x5F])]));
    }

    #[test]
    fn test_default_colors() {
        let trace = Trace::default();
        let display = Small::new(RecordingTransport::new(&trace));
        assert_eq!(display.fg_color(), WHITE);
        assert_eq!(display.bg_color(), BLACK);
        assert_eq!(display.buffer().len(), 4 * 3 * 2);
    }

    #[test]
    fn test_draw_pixel_stores_big_endian() {
        let trace = Trace::default();
        let mut display = ready(&trace);
        display.set_fg_color(0xF800);
        display.set_bg_color(0x001F);
        display.draw_pixel(1, 2, true);
        display.draw_pixel(2, 2, false);

        assert_eq!(display.pixel(1, 2), Some(0xF800));
        assert_eq!(display.pixel(2, 2), Some(0x001F));
        let offset = (2 * 4 + 1) * 2;
        assert_eq!(display.buffer()[offset..offset + 2], [0xF8, 0x00]);
        assert_eq!(display.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_uses_current_colors() {
        let trace = Trace::default();
        let mut display = ready(&trace);
        display.set_fg_color(0x07E0);
        display.fill(true);
        assert!(display.buffer().chunks(2).all(|p| p == [0x07, 0xE0]));
        display.set_bg_color(0x1234);
        display.fill(false);
        assert!(display.buffer().chunks(2).all(|p| p == [0x12, 0x34]));
    }

    #[test]
    fn test_update_sends_window_then_one_transfer() {
        let trace = Trace::default();
        let mut display = ready(&trace);
        display.draw_pixel(0, 0, true);
        display.update().unwrap();

        let frames = trace.frames();
        assert_eq!(
            frames[..7],
            [
                Event::Command(cmd::SET_COLUMN_ADDRESS),
                Event::Data(vec![0x00]),
                Event::Data(vec![3]),
                Event::Command(cmd::SET_ROW_ADDRESS),
                Event::Data(vec![0x00]),
                Event::Data(vec![2]),
                Event::Command(cmd::WRITE_RAM),
            ]
        );
        assert_eq!(frames.len(), 8);
        assert_eq!(frames[7], Event::Data(display.buffer().to_vec()));
    }

    #[test]
    fn test_update_before_init_is_rejected() {
        let trace = Trace::default();
        let mut display = Small::new(RecordingTransport::new(&trace));
        assert_eq!(display.update(), Err(DisplayError::NotInitialized));
        assert_eq!(display.set_contrast(3), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_contrast_is_masked() {
        let trace = Trace::default();
        let mut display = ready(&trace);
        display.set_contrast(0xFA).unwrap();
        assert_eq!(
            trace.frames(),
            [Event::Command(cmd::MASTER_CONTRAST), Event::Data(vec![0x0A])]
        );
    }

    #[test]
    fn test_invert_and_power() {
        let trace = Trace::default();
        let mut display = ready(&trace);
        display.set_inverted(true).unwrap();
        display.set_inverted(false).unwrap();
        display.set_display_on(false).unwrap();
        assert_eq!(
            trace.frames(),
            [
                Event::Command(cmd::INVERSE_DISPLAY),
                Event::Command(cmd::NORMAL_DISPLAY),
                Event::Command(cmd::DISPLAY_OFF),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_draw_touches_one_pixel(x in 0usize..4, y in 0usize..3, color: u16) {
            let trace = Trace::default();
            let mut display = ready(&trace);
            display.set_fg_color(color);
            display.draw_pixel(x, y, true);
            for py in 0..3 {
                for px in 0..4 {
                    let expected = if (px, py) == (x, y) { color } else { BLACK };
                    prop_assert_eq!(display.pixel(px, py), Some(expected));
                }
            }
        }
    }
}
