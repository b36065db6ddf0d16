//! Sub-byte pixel packing
//!
//! The 4-bit grayscale framebuffer stores two pixels per byte. Pixel
//! `(x, y)` lives in byte `x + (y / 2) * width`: even rows use the low
//! nibble and odd rows the high nibble, so vertically adjacent rows share
//! a byte. Writes mask the nibble so the paired row is never disturbed.
//!
//! This module knows nothing about panel bounds. Callers check
//! `x < width` before addressing; an `x` past the width would land in the
//! next row pair.

/// Bytes needed for a 4-bit framebuffer, rounded up to a whole byte
pub const fn buffer_len(width: usize, height: usize) -> usize {
    (width * height + 1) / 2
}

/// Largest 4-bit gray level
pub const GRAY4_MAX: u8 = 0x0F;

/// 4-bit grayscale packing for a panel of fixed width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gray4 {
    width: usize,
}

impl Gray4 {
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    /// Byte holding pixel `(x, y)`
    pub const fn byte_index(&self, x: usize, y: usize) -> usize {
        x + (y / 2) * self.width
    }

    const fn shift(y: usize) -> u32 {
        if y % 2 == 0 {
            0
        } else {
            4
        }
    }

    /// Read the level of pixel `(x, y)`
    ///
    /// Returns `None` if the byte is outside `buffer`.
    pub fn read(&self, buffer: &[u8], x: usize, y: usize) -> Option<u8> {
        buffer
            .get(self.byte_index(x, y))
            .map(|byte| (byte >> Self::shift(y)) & GRAY4_MAX)
    }

    /// Write the level of pixel `(x, y)`, keeping the paired nibble
    ///
    /// Only the low four bits of `level` are used. Writes outside
    /// `buffer` are dropped.
    pub fn write(&self, buffer: &mut [u8], x: usize, y: usize, level: u8) {
        let shift = Self::shift(y);
        let mask = GRAY4_MAX << shift;
        if let Some(byte) = buffer.get_mut(self.byte_index(x, y)) {
            *byte = (*byte & !mask) | ((level & GRAY4_MAX) << shift);
        }
    }
}
