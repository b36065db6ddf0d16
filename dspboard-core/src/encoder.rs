//! Rotary Encoder Handler
//!
//! Decodes quadrature encoder signals into detent steps and debounces the
//! push switch. Both run from one periodic [`EncoderInput::debounce`] tick
//! on the main loop.

use dspboard_hal::pins::seed;
use dspboard_hal::{ClaimPins, ConfigError, HalError, InputPin, Pin, PinSet, Pull};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pins for an encoder with a push switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderPins {
    pub a: Pin,
    pub b: Pin,
    pub click: Pin,
}

impl EncoderPins {
    pub fn as_array(&self) -> [Pin; 3] {
        [self.a, self.b, self.click]
    }
}

impl ClaimPins for EncoderPins {
    fn claim_pins(&self, pins: &mut PinSet) -> Result<(), ConfigError> {
        pins.claim_all(&self.as_array())
    }
}

impl Default for EncoderPins {
    fn default() -> Self {
        Self {
            a: seed::D12,
            b: seed::D11,
            click: seed::D0,
        }
    }
}

/// Encoder capability used by the board
pub trait EncoderInput {
    /// Configure the input lines
    fn init(&mut self, pins: &EncoderPins) -> Result<(), HalError>;

    /// Sample the lines once; `now_ms` timestamps switch presses
    fn debounce(&mut self, now_ms: u32);

    /// Detents moved during the last tick: +1 clockwise, -1 counter-clockwise
    fn increment(&self) -> i32;

    /// Switch held down (after debounce)
    fn pressed(&self) -> bool;

    /// Switch went down on the last tick
    fn rising_edge(&self) -> bool;

    /// Switch was released on the last tick
    fn falling_edge(&self) -> bool;

    /// How long the switch has been held, 0 when released
    fn time_held_ms(&self) -> u32;
}

/// Quadrature state machine states
#[derive(Clone, Copy, PartialEq, Debug)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Step {
    Cw,
    Ccw,
}

// Switch history patterns, newest sample in bit 0, pressed = 1
const SWITCH_HELD: u8 = 0xFF;
const SWITCH_RISE: u8 = 0x7F;
const SWITCH_FALL: u8 = 0x80;

/// Quadrature encoder with push switch, active low with pull-ups
pub struct QuadratureEncoder<A, B, C> {
    a: A,
    b: B,
    click: C,
    state: State,
    last_a: bool,
    last_b: bool,
    increment: i32,
    switch_history: u8,
    pressed_at: u32,
    held_ms: u32,
}

impl<A, B, C> QuadratureEncoder<A, B, C>
where
    A: InputPin,
    B: InputPin,
    C: InputPin,
{
    pub fn new(a: A, b: B, click: C) -> Self {
        Self {
            a,
            b,
            click,
            state: State::Idle,
            last_a: true,
            last_b: true,
            increment: 0,
            switch_history: 0,
            pressed_at: 0,
            held_ms: 0,
        }
    }

    /// Decode encoder state using state machine
    ///
    /// Quadrature encoding:
    /// CW:  A leads B (A changes first when rotating clockwise)
    /// CCW: B leads A (B changes first when rotating counter-clockwise)
    ///
    /// State transitions for CW rotation:
    /// Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> step -> Idle
    ///
    /// State transitions for CCW rotation:
    /// Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> step -> Idle
    fn decode(&mut self, a: bool, b: bool) -> Option<Step> {
        match self.state {
            State::Idle => {
                if !a && b {
                    self.state = State::CwStep1;
                } else if a && !b {
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 | State::CcwStep1 => {
                if !a && !b {
                    self.state = if self.state == State::CwStep1 {
                        State::CwStep2
                    } else {
                        State::CcwStep2
                    };
                } else if a && b {
                    // Bounce back to rest
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 | State::CcwStep2 => {
                if !(a || b) {
                    return None;
                }
                let step = if self.state == State::CwStep2 {
                    Step::Cw
                } else {
                    Step::Ccw
                };
                self.state = State::Idle;
                Some(step)
            }
        }
    }

    fn debounce_switch(&mut self, now_ms: u32) {
        let down = self.click.is_low();
        self.switch_history = (self.switch_history << 1) | u8::from(down);

        if self.rising_edge() {
            self.pressed_at = now_ms;
        }
        self.held_ms = if self.pressed() {
            now_ms.wrapping_sub(self.pressed_at)
        } else {
            0
        };
    }
}

impl<A, B, C> EncoderInput for QuadratureEncoder<A, B, C>
where
    A: InputPin,
    B: InputPin,
    C: InputPin,
{
    fn init(&mut self, pins: &EncoderPins) -> Result<(), HalError> {
        self.a.init(pins.a, Pull::Up)?;
        self.b.init(pins.b, Pull::Up)?;
        self.click.init(pins.click, Pull::Up)?;
        self.last_a = self.a.is_high();
        self.last_b = self.b.is_high();
        self.state = State::Idle;
        self.increment = 0;
        self.switch_history = 0;
        self.held_ms = 0;
        Ok(())
    }

    fn debounce(&mut self, now_ms: u32) {
        let a = self.a.is_high();
        let b = self.b.is_high();

        self.increment = 0;
        if a != self.last_a || b != self.last_b {
            self.increment = match self.decode(a, b) {
                Some(Step::Cw) => 1,
                Some(Step::Ccw) => -1,
                None => 0,
            };
            self.last_a = a;
            self.last_b = b;
        }

        self.debounce_switch(now_ms);
    }

    fn increment(&self) -> i32 {
        self.increment
    }

    fn pressed(&self) -> bool {
        self.switch_history == SWITCH_HELD
    }

    fn rising_edge(&self) -> bool {
        self.switch_history == SWITCH_RISE
    }

    fn falling_edge(&self) -> bool {
        self.switch_history == SWITCH_FALL
    }

    fn time_held_ms(&self) -> u32 {
        self.held_ms
    }
}
