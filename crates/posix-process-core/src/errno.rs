//! Platform error numbers and their portable classification.
//!
//! An [`Errno`] is captured immediately after a failing call returns, before
//! anything else can overwrite the thread's error state. [`Semantic`] is a
//! best-effort portable view over it; codes it does not recognize map to
//! `None` instead of a guess.

use std::fmt;
use std::io;

/// A raw platform error number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(i32);

impl Errno {
    pub const EPERM: Self = Self(libc::EPERM);
    pub const ENOENT: Self = Self(libc::ENOENT);
    pub const ESRCH: Self = Self(libc::ESRCH);
    pub const EINTR: Self = Self(libc::EINTR);
    pub const E2BIG: Self = Self(libc::E2BIG);
    pub const ENOEXEC: Self = Self(libc::ENOEXEC);
    pub const ECHILD: Self = Self(libc::ECHILD);
    pub const EAGAIN: Self = Self(libc::EAGAIN);
    pub const ENOMEM: Self = Self(libc::ENOMEM);
    pub const EACCES: Self = Self(libc::EACCES);
    pub const EFAULT: Self = Self(libc::EFAULT);
    pub const ENOTDIR: Self = Self(libc::ENOTDIR);
    pub const EINVAL: Self = Self(libc::EINVAL);
    pub const ETXTBSY: Self = Self(libc::ETXTBSY);
    pub const ENAMETOOLONG: Self = Self(libc::ENAMETOOLONG);
    pub const ELOOP: Self = Self(libc::ELOOP);

    /// Wraps a raw error number, e.g. the return value of `posix_spawn`.
    #[must_use]
    pub const fn from_raw(code: i32) -> Self {
        Self(code)
    }

    /// Captures the calling thread's current error number.
    ///
    /// Must be called directly after the failing call, with nothing in
    /// between that could itself touch the error state.
    #[must_use]
    pub fn last() -> Self {
        Self(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Symbolic name for the codes this crate deals in.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            libc::EPERM => "EPERM",
            libc::ENOENT => "ENOENT",
            libc::ESRCH => "ESRCH",
            libc::EINTR => "EINTR",
            libc::E2BIG => "E2BIG",
            libc::ENOEXEC => "ENOEXEC",
            libc::ECHILD => "ECHILD",
            libc::EAGAIN => "EAGAIN",
            libc::ENOMEM => "ENOMEM",
            libc::EACCES => "EACCES",
            libc::EFAULT => "EFAULT",
            libc::ENOTDIR => "ENOTDIR",
            libc::EINVAL => "EINVAL",
            libc::ETXTBSY => "ETXTBSY",
            libc::ENAMETOOLONG => "ENAMETOOLONG",
            libc::ELOOP => "ELOOP",
            _ => return None,
        };
        Some(name)
    }

    /// Portable category of this code, if there is one.
    #[must_use]
    pub const fn semantic(self) -> Option<Semantic> {
        Semantic::classify(self)
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = io::Error::from_raw_os_error(self.0);
        match self.name() {
            Some(name) => write!(f, "{name}: {description}"),
            None => write!(f, "{description}"),
        }
    }
}

impl From<Errno> for io::Error {
    fn from(errno: Errno) -> Self {
        io::Error::from_raw_os_error(errno.0)
    }
}

/// Portable category layered over a raw [`Errno`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantic {
    /// Process table, memory or another kernel resource is exhausted.
    ResourceLimit,
    /// The caller lacks the privilege, or the state forbids the operation.
    NoPermission,
    /// No process, group or waitable child matches.
    NoSuchProcess,
    /// A signal arrived while the call was blocked.
    Interrupted,
    /// An argument was rejected.
    InvalidArgument,
}

impl Semantic {
    /// Maps a raw code to its category. Unmapped codes yield `None`.
    #[must_use]
    pub const fn classify(errno: Errno) -> Option<Self> {
        match errno.0 {
            libc::EAGAIN | libc::ENOMEM => Some(Self::ResourceLimit),
            libc::EPERM | libc::EACCES => Some(Self::NoPermission),
            libc::ESRCH | libc::ECHILD => Some(Self::NoSuchProcess),
            libc::EINTR => Some(Self::Interrupted),
            libc::EINVAL => Some(Self::InvalidArgument),
            _ => None,
        }
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ResourceLimit => "resource limit",
            Self::NoPermission => "no permission",
            Self::NoSuchProcess => "no such process",
            Self::Interrupted => "interrupted",
            Self::InvalidArgument => "invalid argument",
        })
    }
}
