//! System clock abstraction

use embedded_hal::delay::DelayNs;

/// Monotonic millisecond clock with blocking delays
///
/// `now_ms` wraps around after roughly 49 days; callers compare timestamps
/// with `wrapping_sub`.
pub trait SystemClock: DelayNs {
    /// Milliseconds since boot
    fn now_ms(&self) -> u32;
}
