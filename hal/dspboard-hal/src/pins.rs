//! Pin maps
//!
//! Named header pins so board definitions read like the silkscreen.

/// Processor module header pins
pub mod seed {
    use crate::gpio::{Pin, Port};

    pub const D0: Pin = Pin::new(Port::B, 12);
    pub const D1: Pin = Pin::new(Port::C, 11);
    pub const D2: Pin = Pin::new(Port::C, 10);
    pub const D3: Pin = Pin::new(Port::C, 9);
    pub const D4: Pin = Pin::new(Port::C, 8);
    pub const D5: Pin = Pin::new(Port::D, 2);
    pub const D6: Pin = Pin::new(Port::C, 12);
    pub const D7: Pin = Pin::new(Port::G, 10);
    pub const D8: Pin = Pin::new(Port::G, 11);
    pub const D9: Pin = Pin::new(Port::B, 4);
    pub const D10: Pin = Pin::new(Port::B, 5);
    pub const D11: Pin = Pin::new(Port::B, 8);
    pub const D12: Pin = Pin::new(Port::B, 9);
    pub const D13: Pin = Pin::new(Port::B, 6);
    pub const D14: Pin = Pin::new(Port::B, 7);
    pub const D15: Pin = Pin::new(Port::C, 0);
    pub const D16: Pin = Pin::new(Port::A, 3);
    pub const D17: Pin = Pin::new(Port::B, 1);
    pub const D18: Pin = Pin::new(Port::A, 7);
    pub const D19: Pin = Pin::new(Port::A, 6);
    pub const D20: Pin = Pin::new(Port::C, 1);
    pub const D21: Pin = Pin::new(Port::C, 4);
    pub const D22: Pin = Pin::new(Port::A, 5);
    pub const D23: Pin = Pin::new(Port::A, 4);
    pub const D24: Pin = Pin::new(Port::A, 1);
    pub const D25: Pin = Pin::new(Port::A, 0);
    pub const D26: Pin = Pin::new(Port::D, 11);
    pub const D27: Pin = Pin::new(Port::G, 9);
    pub const D28: Pin = Pin::new(Port::A, 2);
    pub const D29: Pin = Pin::new(Port::B, 14);
    pub const D30: Pin = Pin::new(Port::B, 15);
}
