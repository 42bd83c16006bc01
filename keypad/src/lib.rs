#![cfg_attr(not(test), no_std)]

//! Debounced key input for the 16x2 LCD keypad shield.
//!
//! The five keys share one analog line through a resistor ladder. [`Debouncer`]
//! polls a [`KeySampler`] and a [`MillisClock`] and reports a key only after it
//! has read the same for [`DEBOUNCE_WINDOW_MS`].

mod backlight;
mod clock;
mod debouncer;
mod key;
mod sampler;

pub use backlight::Backlight;
pub use clock::{EmbeddedTimeClock, MillisClock, Timestamp};
pub use debouncer::{DebounceState, Debouncer, Error, KeyListener, DEBOUNCE_WINDOW_MS};
pub use key::{Key, KEY_THRESHOLDS};
pub use sampler::{AnalogKeypad, KeySampler};
