//! Typed wrapper over `sigset_t`.

use std::fmt;

use libc::{c_int, sigset_t};

use crate::signal::{Error, Number};
use crate::sys;

// Highest signal number checked when comparing or listing sets.
#[cfg(any(target_os = "linux", target_os = "android"))]
const SCAN_LIMIT: c_int = 64;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const SCAN_LIMIT: c_int = 31;

/// A set of signals.
///
/// Mutations and queries fail only for an invalid signal number. The
/// `contains` query is fallible too, so that "not a member" and "could not
/// ask" stay distinct.
#[derive(Clone, Copy)]
pub struct Set {
    raw: sigset_t,
}

impl Set {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            raw: sys::sigemptyset(),
        }
    }

    /// Every signal the platform knows.
    #[must_use]
    pub fn full() -> Self {
        Self {
            raw: sys::sigfillset(),
        }
    }

    /// Builds a set, stopping at the first invalid signal.
    pub fn try_from_signals<I>(signals: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Number>,
    {
        let mut set = Self::empty();
        for signal in signals {
            set.insert(signal)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, signal: Number) -> Result<(), Error> {
        sys::sigaddset(&mut self.raw, signal.raw()).map_err(Error::Set)
    }

    pub fn remove(&mut self, signal: Number) -> Result<(), Error> {
        sys::sigdelset(&mut self.raw, signal.raw()).map_err(Error::Set)
    }

    pub fn contains(&self, signal: Number) -> Result<bool, Error> {
        sys::sigismember(&self.raw, signal.raw()).map_err(Error::Set)
    }

    /// Named signals ([`Number::ALL`]) in the set.
    pub fn iter(&self) -> impl Iterator<Item = Number> + '_ {
        Number::ALL
            .into_iter()
            .filter(|signal| self.contains(*signal) == Ok(true))
    }

    pub(crate) fn from_raw(raw: sigset_t) -> Self {
        Self { raw }
    }

    pub(crate) fn as_raw(&self) -> &sigset_t {
        &self.raw
    }

    // Members among the numbers the platform accepts.
    fn members(&self) -> impl Iterator<Item = c_int> + '_ {
        (1..=SCAN_LIMIT).filter(|&n| sys::sigismember(&self.raw, n) == Ok(true))
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::empty()
    }
}

// Equal when membership agrees; padding bits in `sigset_t` are ignored.
impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.members().eq(other.members())
    }
}

impl Eq for Set {}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.members().map(Number::from_raw))
            .finish()
    }
}
