//! Controller command sets and bring-up sequences
//!
//! Bring-up sequences are kept as data so they can be diffed against the
//! datasheets and checked in tests. Order matters: later commands assume
//! the addressing commands before them already took effect.

use embedded_hal::delay::DelayNs;

use dspboard_hal::HalError;

use crate::transport::Transport;

/// One step of a controller bring-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// Opcode followed by its argument bytes
    Command { opcode: u8, args: &'static [u8] },
    /// Opcode followed by `0` and the last column of the panel
    ColumnWindow(u8),
    /// Opcode followed by `0` and the last row of the panel
    RowWindow(u8),
    /// Opcode followed by the multiplex ratio (rows - 1)
    MuxRatio(u8),
    /// Blocking wait
    DelayMs(u32),
}

/// Addressable area of a panel, in controller units
///
/// Columns count whatever the controller addresses per column (pixel
/// pairs on the SSD1327).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub last_column: u8,
    pub last_row: u8,
}

const fn cmd(opcode: u8, args: &'static [u8]) -> InitStep {
    InitStep::Command { opcode, args }
}

/// How a controller expects command arguments on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgFraming {
    /// Arguments are sent with the select line in command state
    Command,
    /// Arguments are sent as data bytes
    Data,
}

/// Send an opcode and its arguments
pub fn send<T: Transport>(
    transport: &mut T,
    framing: ArgFraming,
    opcode: u8,
    args: &[u8],
) -> Result<(), HalError> {
    transport.send_command(opcode)?;
    match framing {
        ArgFraming::Command => args.iter().try_for_each(|&arg| transport.send_command(arg)),
        ArgFraming::Data => args.iter().try_for_each(|&arg| transport.send_byte(arg)),
    }
}

/// Play a bring-up sequence for a panel covering `window`
pub fn run<T: Transport, D: DelayNs>(
    transport: &mut T,
    framing: ArgFraming,
    steps: &[InitStep],
    window: Window,
    delay: &mut D,
) -> Result<(), HalError> {
    for step in steps {
        match *step {
            InitStep::Command { opcode, args } => send(transport, framing, opcode, args)?,
            InitStep::ColumnWindow(opcode) => {
                send(transport, framing, opcode, &[0x00, window.last_column])?
            }
            InitStep::RowWindow(opcode) => {
                send(transport, framing, opcode, &[0x00, window.last_row])?
            }
            InitStep::MuxRatio(opcode) => send(transport, framing, opcode, &[window.last_row])?,
            InitStep::DelayMs(ms) => delay.delay_ms(ms),
        }
    }
    Ok(())
}

/// SSD1327 4-bit grayscale controller, up to 128x128
///
/// Arguments are framed as commands.
pub mod ssd1327 {
    use super::{cmd, ArgFraming, InitStep};

    pub const FRAMING: ArgFraming = ArgFraming::Command;

    pub const SET_COLUMN_ADDRESS: u8 = 0x15;
    pub const SET_ROW_ADDRESS: u8 = 0x75;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_REMAP: u8 = 0xA0;
    pub const SET_START_LINE: u8 = 0xA1;
    pub const SET_DISPLAY_OFFSET: u8 = 0xA2;
    pub const NORMAL_DISPLAY: u8 = 0xA4;
    pub const INVERSE_DISPLAY: u8 = 0xA7;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const FUNCTION_SELECT_A: u8 = 0xAB;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_PHASE_LENGTH: u8 = 0xB1;
    pub const SET_CLOCK_DIV: u8 = 0xB3;
    pub const SET_SECOND_PRECHARGE: u8 = 0xB6;
    pub const SET_PRECHARGE_VOLTAGE: u8 = 0xBC;
    pub const SET_VCOMH: u8 = 0xBE;
    pub const FUNCTION_SELECT_B: u8 = 0xD5;
    pub const SET_COMMAND_LOCK: u8 = 0xFD;

    /// Power-on sequence; the window and multiplex ratio follow the panel
    pub const INIT: &[InitStep] = &[
        cmd(DISPLAY_OFF, &[]),
        InitStep::ColumnWindow(SET_COLUMN_ADDRESS),
        InitStep::RowWindow(SET_ROW_ADDRESS),
        cmd(SET_CONTRAST, &[0x80]),
        cmd(SET_REMAP, &[0x51]),
        cmd(SET_START_LINE, &[0x00]),
        cmd(SET_DISPLAY_OFFSET, &[0x00]),
        cmd(NORMAL_DISPLAY, &[]),
        InitStep::MuxRatio(SET_MUX_RATIO),
        cmd(SET_PHASE_LENGTH, &[0xF1]),
        // 100 Hz frame rate
        cmd(SET_CLOCK_DIV, &[0x00]),
        // Internal VDD regulator
        cmd(FUNCTION_SELECT_A, &[0x01]),
        cmd(SET_SECOND_PRECHARGE, &[0x0F]),
        cmd(SET_VCOMH, &[0x0F]),
        cmd(SET_PRECHARGE_VOLTAGE, &[0x08]),
        cmd(FUNCTION_SELECT_B, &[0x62]),
        cmd(SET_COMMAND_LOCK, &[0x12]),
        InitStep::DelayMs(200),
        cmd(DISPLAY_ON, &[]),
    ];
}

/// SSD1351 16-bit RGB controller, up to 128x128
///
/// Arguments are framed as data.
pub mod ssd1351 {
    use super::{cmd, ArgFraming, InitStep};

    pub const FRAMING: ArgFraming = ArgFraming::Data;

    pub const SET_COLUMN_ADDRESS: u8 = 0x15;
    pub const WRITE_RAM: u8 = 0x5C;
    pub const SET_ROW_ADDRESS: u8 = 0x75;
    pub const SET_REMAP: u8 = 0xA0;
    pub const SET_START_LINE: u8 = 0xA1;
    pub const SET_DISPLAY_OFFSET: u8 = 0xA2;
    pub const ALL_OFF: u8 = 0xA4;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const INVERSE_DISPLAY: u8 = 0xA7;
    pub const FUNCTION_SELECT: u8 = 0xAB;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_PHASE_LENGTH: u8 = 0xB1;
    pub const DISPLAY_ENHANCEMENT: u8 = 0xB2;
    pub const SET_CLOCK_DIV: u8 = 0xB3;
    pub const SET_VSL: u8 = 0xB4;
    pub const SET_SECOND_PRECHARGE: u8 = 0xB6;
    pub const SET_PRECHARGE_VOLTAGE: u8 = 0xBB;
    pub const SET_VCOMH: u8 = 0xBE;
    pub const SET_CONTRAST_ABC: u8 = 0xC1;
    pub const MASTER_CONTRAST: u8 = 0xC7;
    pub const SET_MUX_RATIO: u8 = 0xCA;
    pub const SET_COMMAND_LOCK: u8 = 0xFD;

    /// Power-on sequence; the window and multiplex ratio follow the panel
    pub const INIT: &[InitStep] = &[
        // Unlock the protected commands (A2, B1, B3, BB, BE, C1)
        cmd(SET_COMMAND_LOCK, &[0x12]),
        cmd(SET_COMMAND_LOCK, &[0xB1]),
        cmd(DISPLAY_OFF, &[]),
        cmd(ALL_OFF, &[]),
        InitStep::ColumnWindow(SET_COLUMN_ADDRESS),
        InitStep::RowWindow(SET_ROW_ADDRESS),
        cmd(SET_CLOCK_DIV, &[0xF1]),
        InitStep::MuxRatio(SET_MUX_RATIO),
        // Horizontal increment, 65k color
        cmd(SET_REMAP, &[0x74]),
        cmd(SET_START_LINE, &[0x00]),
        cmd(SET_DISPLAY_OFFSET, &[0x00]),
        cmd(FUNCTION_SELECT, &[0x01]),
        cmd(SET_VSL, &[0xA0, 0xB5, 0x55]),
        cmd(SET_CONTRAST_ABC, &[0xC8, 0x80, 0xC0]),
        cmd(MASTER_CONTRAST, &[0x0F]),
        cmd(SET_PHASE_LENGTH, &[0x32]),
        cmd(DISPLAY_ENHANCEMENT, &[0xA4, 0x00, 0x00]),
        cmd(SET_PRECHARGE_VOLTAGE, &[0x17]),
        cmd(SET_SECOND_PRECHARGE, &[0x01]),
        cmd(SET_VCOMH, &[0x05]),
        cmd(NORMAL_DISPLAY, &[]),
        InitStep::DelayMs(200),
        cmd(DISPLAY_ON, &[]),
    ];
}
