use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};

use crate::Key;

const NATIVE_RESOLUTION_BITS: u8 = 10;

/// Source of the instantaneous, undebounced key.
///
/// Every call must take a fresh reading, implementations should not cache.
pub trait KeySampler {
    type Error;

    fn sample(&mut self) -> Result<Key, Self::Error>;
}

impl<F> KeySampler for F
where
    F: FnMut() -> Key,
{
    type Error = Infallible;

    fn sample(&mut self) -> Result<Key, Self::Error> {
        Ok(self())
    }
}

/// Reads the keypad ladder through an ADC channel.
pub struct AnalogKeypad<Adc, Pin, Marker, Word = u16> {
    adc: Adc,
    pin: Pin,
    shift: u8,
    _marker: PhantomData<(Marker, Word)>,
}

impl<Adc, Pin, Marker, Word> AnalogKeypad<Adc, Pin, Marker, Word>
where
    Adc: OneShot<Marker, Word, Pin>,
    Pin: Channel<Marker>,
    Word: Into<u16>,
{
    /// Expects readings on the 10-bit scale the thresholds are defined on.
    pub fn new(adc: Adc, pin: Pin) -> Self {
        Self {
            adc,
            pin,
            shift: 0,
            _marker: PhantomData,
        }
    }

    /// For converters wider than 10 bits, readings are scaled down before classifying.
    pub fn with_resolution(mut self, bits: u8) -> Self {
        self.shift = bits.saturating_sub(NATIVE_RESOLUTION_BITS);
        self
    }

    pub fn read_raw(&mut self) -> Result<u16, Adc::Error> {
        //a one shot conversion completes in microseconds
        let reading: u16 = nb::block!(self.adc.read(&mut self.pin))?.into();
        Ok(reading >> self.shift)
    }

    pub fn free(self) -> (Adc, Pin) {
        (self.adc, self.pin)
    }
}

impl<Adc, Pin, Marker, Word> KeySampler for AnalogKeypad<Adc, Pin, Marker, Word>
where
    Adc: OneShot<Marker, Word, Pin>,
    Pin: Channel<Marker>,
    Word: Into<u16>,
{
    type Error = Adc::Error;

    fn sample(&mut self) -> Result<Key, Self::Error> {
        self.read_raw().map(Key::from_reading)
    }
}
