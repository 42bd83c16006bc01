use embedded_time::clock;
use embedded_time::duration::Milliseconds;
use log::{debug, info};

use crate::clock::{MillisClock, Timestamp};
use crate::sampler::KeySampler;
use crate::Key;

/// A new key has to read the same for this long before it is accepted.
pub const DEBOUNCE_WINDOW_MS: u32 = 50;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum DebounceState {
    Released,
    ReleasedToPushed,
    Pushed,
    PushedToReleased,
    PushedToPushed,
}

impl DebounceState {
    pub fn is_stable(self) -> bool {
        matches!(self, DebounceState::Released | DebounceState::Pushed)
    }
}

#[derive(Debug)]
pub enum Error<E> {
    Sample(E),
    Clock(clock::Error),
}

/// Receives each newly confirmed key.
pub trait KeyListener {
    fn on_key(&mut self, key: Key);
}

impl<F> KeyListener for F
where
    F: FnMut(Key),
{
    fn on_key(&mut self, key: Key) {
        self(key)
    }
}

/// Debounces the keypad with a fixed confirmation window.
///
/// Stable states look for a sample that differs from the confirmed key and
/// open a window. Transitional states wait for the window to close, then
/// accept the candidate only if the key still reads the same.
pub struct Debouncer<S, C, L = fn(Key)> {
    sampler: S,
    clock: C,
    listener: Option<L>,
    state: DebounceState,
    candidate: Key,
    confirmed: Key,
    deadline: Timestamp,
}

impl<S, C> Debouncer<S, C>
where
    S: KeySampler,
    C: MillisClock,
{
    pub fn new(sampler: S, clock: C) -> Self {
        Self {
            sampler,
            clock,
            listener: None,
            state: DebounceState::Released,
            candidate: Key::None,
            confirmed: Key::None,
            deadline: Timestamp::default(),
        }
    }
}

impl<S, C, L> Debouncer<S, C, L>
where
    S: KeySampler,
    C: MillisClock,
    L: KeyListener,
{
    /// Runs one step of the state machine, never waits.
    pub fn advance(&mut self) -> Result<(), Error<S::Error>> {
        match self.state {
            DebounceState::Released | DebounceState::Pushed => self.trigger(),
            DebounceState::ReleasedToPushed => {
                self.confirm(DebounceState::Pushed, DebounceState::Released)
            }
            DebounceState::PushedToReleased => {
                self.confirm(DebounceState::Released, DebounceState::Pushed)
            }
            DebounceState::PushedToPushed => {
                self.confirm(DebounceState::Pushed, DebounceState::Pushed)
            }
        }
    }

    fn trigger(&mut self) -> Result<(), Error<S::Error>> {
        debug_assert!(self.state.is_stable(), "trigger in {:?}", self.state);

        let key = self.sampler.sample().map_err(Error::Sample)?;
        if key == self.confirmed {
            return Ok(());
        }
        let now = self.clock.try_now().map_err(Error::Clock)?;

        self.state = match (self.state, key) {
            (DebounceState::Released, _) => DebounceState::ReleasedToPushed,
            (_, Key::None) => DebounceState::PushedToReleased,
            _ => DebounceState::PushedToPushed,
        };
        self.candidate = key;
        self.deadline = now + Milliseconds(DEBOUNCE_WINDOW_MS);
        debug!("{} -> {} suspected, {:?}", self.confirmed, key, self.state);

        Ok(())
    }

    fn confirm(
        &mut self,
        on_ok: DebounceState,
        on_ng: DebounceState,
    ) -> Result<(), Error<S::Error>> {
        debug_assert!(!self.state.is_stable(), "confirm in {:?}", self.state);

        let now = self.clock.try_now().map_err(Error::Clock)?;
        if !now.has_reached(self.deadline) {
            return Ok(());
        }

        let key = self.sampler.sample().map_err(Error::Sample)?;
        if key == self.candidate {
            self.state = on_ok;
            self.confirmed = key;
            info!("key {}", key);
            if let Some(listener) = self.listener.as_mut() {
                listener.on_key(key);
            }
        } else {
            debug!("{} rejected, read {}", self.candidate, key);
            self.state = on_ng;
            self.candidate = self.confirmed;
        }

        Ok(())
    }

    /// Replaces the listener, `None` stops notifications.
    pub fn set_key_listener(&mut self, listener: Option<L>) {
        self.listener = listener;
    }

    /// Swaps in a listener of another type, debounce state carries over.
    pub fn with_key_listener<L2: KeyListener>(self, listener: L2) -> Debouncer<S, C, L2> {
        Debouncer {
            sampler: self.sampler,
            clock: self.clock,
            listener: Some(listener),
            state: self.state,
            candidate: self.candidate,
            confirmed: self.confirmed,
            deadline: self.deadline,
        }
    }

    /// The last confirmed key.
    pub fn current_key(&self) -> Key {
        self.confirmed
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Candidate key and the time it can be confirmed, while a transition is open.
    pub fn pending(&self) -> Option<(Key, Timestamp)> {
        if self.state.is_stable() {
            None
        } else {
            Some((self.candidate, self.deadline))
        }
    }

    pub fn free(self) -> (S, C) {
        (self.sampler, self.clock)
    }
}
