//! The calling thread's signal mask.
//!
//! Masks are per thread. Changing one here never affects other threads of
//! the process.

pub use posix_process_core::signal::How;

use crate::signal::{Error, Set};
use crate::sys;

/// Changes the calling thread's mask and returns the previous one, so the
/// caller can put it back.
pub fn change(how: How, signals: &Set) -> Result<Set, Error> {
    sys::pthread_sigmask(how.to_raw(), Some(signals.as_raw()))
        .map(Set::from_raw)
        .map_err(Error::Mask)
}

/// The calling thread's mask, unchanged.
pub fn current() -> Result<Set, Error> {
    sys::pthread_sigmask(How::Block.to_raw(), None)
        .map(Set::from_raw)
        .map_err(Error::Mask)
}

/// Signals raised while blocked and not yet delivered.
pub fn pending() -> Result<Set, Error> {
    sys::sigpending().map(Set::from_raw).map_err(Error::Mask)
}

/// Runs `critical` with `signals` additionally blocked, then restores the
/// previous mask.
///
/// Restoration happens on every exit path, including a panic unwinding out
/// of `critical`. A failed restore after a normal return is reported as
/// the error.
pub fn with_blocked<F, R>(signals: &Set, critical: F) -> Result<R, Error>
where
    F: FnOnce() -> R,
{
    let previous = change(How::Block, signals)?;
    let guard = Restore {
        previous,
        armed: true,
    };
    let value = critical();
    guard.finish()?;
    Ok(value)
}

struct Restore {
    previous: Set,
    armed: bool,
}

impl Restore {
    fn finish(mut self) -> Result<(), Error> {
        self.armed = false;
        change(How::Replace, &self.previous).map(drop)
    }
}

impl Drop for Restore {
    fn drop(&mut self) {
        if self.armed {
            // Unwinding: there is no caller left to report a failure to.
            let _ = change(How::Replace, &self.previous);
        }
    }
}
