//! Process, process-group and session identifiers.
//!
//! The three are distinct types over the same `pid_t` namespace so that a
//! group id can never be passed where a process id is expected. None of
//! them converts into another implicitly.

use std::fmt;

use libc::pid_t;

use crate::errno::Errno;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pid_t);

        impl $name {
            /// Wraps a known identifier, e.g. one received from another process.
            #[must_use]
            pub const fn new(raw: pid_t) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn raw(self) -> pid_t {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier! {
    /// Process id.
    ProcessId
}

identifier! {
    /// Process-group id.
    GroupId
}

identifier! {
    /// Session id.
    SessionId
}

impl ProcessId {
    /// Id of the calling process.
    #[must_use]
    pub fn current() -> Self {
        Self(std::process::id() as pid_t)
    }

    /// Id of the calling process's parent.
    #[must_use]
    pub fn parent() -> Self {
        Self(std::os::unix::process::parent_id() as pid_t)
    }
}

/// The process an operation applies to.
///
/// Replaces the raw convention where `0` means "the caller".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Process {
    Current,
    Id(ProcessId),
}

impl Process {
    /// Raw `pid` argument for calls such as `getpgid`, `setpgid` and `getsid`.
    ///
    /// Non-positive explicit ids are rejected with `EINVAL` rather than
    /// being reinterpreted by the kernel as "self" or as a group.
    pub const fn to_raw(self) -> Result<pid_t, Errno> {
        match self {
            Self::Current => Ok(0),
            Self::Id(id) if id.raw() > 0 => Ok(id.raw()),
            Self::Id(_) => Err(Errno::EINVAL),
        }
    }
}

impl From<ProcessId> for Process {
    fn from(id: ProcessId) -> Self {
        Self::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_compare_by_raw_value() {
        assert_eq!(ProcessId::new(7), ProcessId::new(7));
        assert!(ProcessId::new(3) < ProcessId::new(4));
        assert_eq!(GroupId::new(9).raw(), 9);
        assert_eq!(SessionId::new(11).to_string(), "11");
    }

    #[test]
    fn current_and_parent_match_std() {
        assert_eq!(ProcessId::current().raw() as u32, std::process::id());
        assert!(ProcessId::parent().raw() > 0);
        assert_ne!(ProcessId::current(), ProcessId::parent());
    }

    #[test]
    fn process_raw_mapping() {
        assert_eq!(Process::Current.to_raw(), Ok(0));
        assert_eq!(Process::Id(ProcessId::new(42)).to_raw(), Ok(42));
        assert_eq!(Process::Id(ProcessId::new(0)).to_raw(), Err(Errno::EINVAL));
        assert_eq!(Process::Id(ProcessId::new(-5)).to_raw(), Err(Errno::EINVAL));
    }
}
