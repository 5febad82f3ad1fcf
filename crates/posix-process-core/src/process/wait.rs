//! Wait selection and options.
//!
//! `waitpid` overloads its `pid` argument: `-1` is any child, a positive
//! value one child, `0` the caller's own group and anything below `-1` a
//! specific group. [`Selector`] names each case; [`Selector::to_raw`] is
//! the only place the sign convention appears.

use bitflags::bitflags;
use libc::{c_int, pid_t};

use crate::errno::Errno;
use crate::process::id::{GroupId, ProcessId};
use crate::process::status::Status;

/// Which children a wait considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Any child.
    Any,
    /// One specific child.
    Process(ProcessId),
    /// Any child in the given process group.
    Group(GroupId),
    /// Any child in the caller's own process group.
    OwnGroup,
}

impl Selector {
    /// Raw `pid` argument for `waitpid`.
    ///
    /// Ids that would collide with another variant's encoding (a process id
    /// `<= 0`, or a group id `<= 1` whose negation is `-1` or `0`) are
    /// rejected with `EINVAL`.
    pub const fn to_raw(self) -> Result<pid_t, Errno> {
        match self {
            Self::Any => Ok(-1),
            Self::Process(pid) if pid.raw() > 0 => Ok(pid.raw()),
            Self::Group(pgid) if pgid.raw() > 1 => Ok(-pgid.raw()),
            Self::OwnGroup => Ok(0),
            Self::Process(_) | Self::Group(_) => Err(Errno::EINVAL),
        }
    }

    /// Inverse of [`to_raw`](Self::to_raw).
    #[must_use]
    pub const fn from_raw(raw: pid_t) -> Self {
        match raw {
            -1 => Self::Any,
            0 => Self::OwnGroup,
            r if r > 0 => Self::Process(ProcessId::new(r)),
            r => Self::Group(GroupId::new(-r)),
        }
    }
}

impl From<ProcessId> for Selector {
    fn from(pid: ProcessId) -> Self {
        Self::Process(pid)
    }
}

bitflags! {
    /// Wait behavior. The empty set blocks and reports exited children only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Options: c_int {
        /// Return immediately when no eligible child has changed state.
        const NO_HANG = libc::WNOHANG;
        /// Also report children stopped by a signal.
        const REPORT_STOPPED = libc::WUNTRACED;
        /// Also report stopped children resumed by `SIGCONT`.
        const REPORT_CONTINUED = libc::WCONTINUED;
    }
}

impl Options {
    /// Raw `options` argument for `waitpid`.
    #[must_use]
    pub const fn to_raw(self) -> c_int {
        self.bits()
    }
}

/// A child that changed state, with its decoded status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateChange {
    pub process: ProcessId,
    pub status: Status,
}
