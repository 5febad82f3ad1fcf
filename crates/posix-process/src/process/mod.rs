//! Process creation, replacement, collection and membership.
//!
//! The usual lifecycle is: create a child with [`spawn`] (or [`fork`]
//! followed by [`execute`] in the child), then collect it with
//! [`wait::wait`]. Each collection releases the child; its id is no longer
//! a wait target afterwards.

pub mod execute;
pub mod group;
pub mod session;
pub mod spawn;
pub mod strings;
pub mod wait;

use libc::c_int;

pub use posix_process_core::process::{
    Classification, Error, GroupId, Kind, Options, Process, ProcessId, Selector, SessionId,
    StateChange, Status,
};

pub use execute::execute;
pub use spawn::spawn;
pub use strings::{Program, Strings};

use crate::signal::Number;
use crate::sys;

/// Which side of a [`fork`] the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForkOutcome {
    /// Running in the new process.
    Child,
    /// Running in the original process; carries the child's id.
    Parent(ProcessId),
}

/// Duplicates the calling process.
///
/// Prefer [`spawn`] in multithreaded programs: it never duplicates the
/// address space.
///
/// Fails with a resource-limit error when the process table or memory for
/// the copy is exhausted.
///
/// # Safety
///
/// Only the forking thread exists in the child, while every lock held by
/// any other thread stays held. Until the child calls [`execute`] or
/// [`exit_immediately`] it may only use async-signal-safe operations: no
/// allocation, no locks, no buffered I/O, no logging.
#[allow(unsafe_code)]
pub unsafe fn fork() -> Result<ForkOutcome, Error> {
    // SAFETY: the child-side contract is forwarded to our caller.
    match unsafe { sys::fork() } {
        Ok(0) => Ok(ForkOutcome::Child),
        Ok(pid) => {
            log::debug!("forked child {pid}");
            Ok(ForkOutcome::Parent(ProcessId::new(pid)))
        }
        Err(errno) => Err(Error::Fork(errno)),
    }
}

/// Terminates the calling process at once with `code`, via `_exit`.
///
/// No destructors, `atexit` hooks or stdio flushes run. This is the exit to
/// use in a forked child.
pub fn exit_immediately(code: c_int) -> ! {
    sys::exit_immediately(code)
}

/// Forcibly terminates `process` with `SIGKILL`.
///
/// The process still has to be collected with [`wait::wait`].
pub fn kill(process: ProcessId) -> Result<(), Error> {
    if process.raw() <= 0 {
        return Err(Error::Kill(crate::Errno::EINVAL));
    }
    sys::kill(process.raw(), Number::KILL.raw()).map_err(Error::Kill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Errno;

    #[test]
    fn kill_rejects_sentinel_ids() {
        for raw in [0, -1, -42] {
            assert_eq!(
                kill(ProcessId::new(raw)),
                Err(Error::Kill(Errno::EINVAL)),
                "{raw}"
            );
        }
    }
}
