//! Signal delivery.
//!
//! `kill` encodes "this group" as a negated id and "every process" as
//! `-1`. Callers here name the destination instead; the sign trick stays
//! inside this module.

use crate::process::{GroupId, ProcessId};
use crate::signal::{Error, Number};
use crate::{Errno, sys};

/// Sends `signal` to one process.
pub fn to_process(process: ProcessId, signal: Number) -> Result<(), Error> {
    if process.raw() <= 0 {
        return Err(Error::Send(Errno::EINVAL));
    }
    sys::kill(process.raw(), signal.raw()).map_err(Error::Send)
}

/// Sends `signal` to the calling process (not just the calling thread).
pub fn to_self(signal: Number) -> Result<(), Error> {
    to_process(ProcessId::current(), signal)
}

/// Sends `signal` to every member of `group`.
///
/// Group ids `<= 1` are rejected: their negation would mean "every
/// process" or "my own group".
pub fn to_group(group: GroupId, signal: Number) -> Result<(), Error> {
    if group.raw() <= 1 {
        return Err(Error::Send(Errno::EINVAL));
    }
    sys::kill(-group.raw(), signal.raw()).map_err(Error::Send)
}

/// Checks that `process` exists and may be signaled, without sending
/// anything.
pub fn check(process: ProcessId) -> Result<(), Error> {
    if process.raw() <= 0 {
        return Err(Error::Send(Errno::EINVAL));
    }
    sys::kill(process.raw(), 0).map_err(Error::Send)
}
