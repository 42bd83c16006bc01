use core::ops::Add;

use embedded_time::clock;
use embedded_time::duration::{Generic, Milliseconds};
use embedded_time::Clock;

/// Free running millisecond count, wraps at `u32::MAX`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Timestamp(u32);

impl Timestamp {
    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    pub const fn millis(self) -> u32 {
        self.0
    }

    /// True once `self` is at or past `deadline`.
    ///
    /// Compared as a signed difference so that a single wrap of the counter
    /// between the two readings gives the same answer.
    pub fn has_reached(self, deadline: Timestamp) -> bool {
        self.0.wrapping_sub(deadline.0) as i32 >= 0
    }
}

impl Add<Milliseconds<u32>> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Milliseconds<u32>) -> Timestamp {
        Timestamp(self.0.wrapping_add(rhs.0))
    }
}

pub trait MillisClock {
    fn try_now(&self) -> Result<Timestamp, clock::Error>;
}

impl<F> MillisClock for F
where
    F: Fn() -> u32,
{
    fn try_now(&self) -> Result<Timestamp, clock::Error> {
        Ok(Timestamp(self()))
    }
}

/// Millisecond view of an `embedded_time` clock.
///
/// The clock's epoch relative duration is truncated to 32 bits, the result
/// wraps like a hardware millisecond counter.
pub struct EmbeddedTimeClock<C> {
    clock: C,
}

impl<C: Clock> EmbeddedTimeClock<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn inner(&self) -> &C {
        &self.clock
    }
}

impl<C> MillisClock for EmbeddedTimeClock<C>
where
    C: Clock,
    Milliseconds<u64>: TryFrom<Generic<C::T>>,
{
    fn try_now(&self) -> Result<Timestamp, clock::Error> {
        let since_epoch = Clock::try_now(&self.clock)?.duration_since_epoch();
        let millis = Milliseconds::<u64>::try_from(since_epoch)
            .map_err(|_| clock::Error::Unspecified)?;

        Ok(Timestamp(millis.0 as u32))
    }
}
