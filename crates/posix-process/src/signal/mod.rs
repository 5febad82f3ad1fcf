//! Signal sets, masks, dispositions and delivery.

pub mod action;
pub mod mask;
pub mod send;
pub mod set;

use std::convert::Infallible;

pub use posix_process_core::signal::{Error, Kind, Number};

pub use action::Configuration;
pub use set::Set;

use crate::sys;

/// Replaces the calling thread's mask with `mask` and sleeps until a
/// signal whose handler runs (or that terminates the process) arrives.
///
/// The normal completion is [`Error::Interrupted`]; the previous mask is
/// back in place by then.
pub fn suspend(mask: &Set) -> Result<Infallible, Error> {
    let errno = sys::sigsuspend(mask.as_raw());
    if errno == crate::Errno::EINTR {
        Err(Error::Interrupted(errno))
    } else {
        Err(Error::Mask(errno))
    }
}
