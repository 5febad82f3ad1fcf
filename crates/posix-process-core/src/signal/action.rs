//! Signal dispositions: handler kinds and action flags.
//!
//! A handler taking `siginfo_t` only works when `SA_SIGINFO` is set, and a
//! plain handler is misinvoked when it is. [`Flags::reconcile`] ties the
//! flag to the handler kind so the mismatched pairs cannot be built.
//!
//! Handler bodies run in signal context. They may only use
//! async-signal-safe operations: no allocation, no locks, no I/O through
//! buffered std types, no logging. Nothing here can check that.

use std::fmt;

use bitflags::bitflags;
use libc::{c_int, c_void, sighandler_t, siginfo_t};

/// `void handler(int)`.
pub type SimpleHandler = extern "C" fn(c_int);

/// `void handler(int, siginfo_t *, void *)`.
pub type InfoHandler = extern "C" fn(c_int, *mut siginfo_t, *mut c_void);

/// What happens when a signal is delivered.
#[derive(Clone, Copy)]
pub enum Handler {
    /// The signal's default action.
    Default,
    /// Discard the signal.
    Ignore,
    /// Call a handler with the signal number.
    Simple(SimpleHandler),
    /// Call a handler with the signal number and `siginfo_t`.
    Info(InfoHandler),
}

impl Handler {
    /// Raw `sa_handler` / `sa_sigaction` value.
    #[must_use]
    pub fn to_raw(self) -> sighandler_t {
        match self {
            Self::Default => libc::SIG_DFL,
            Self::Ignore => libc::SIG_IGN,
            Self::Simple(f) => f as sighandler_t,
            Self::Info(f) => f as sighandler_t,
        }
    }

    /// Whether this kind needs `SA_SIGINFO`.
    #[must_use]
    pub const fn wants_info(&self) -> bool {
        matches!(self, Self::Info(_))
    }
}

// Handlers compare by address.
impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Default, Self::Default) | (Self::Ignore, Self::Ignore) => true,
            (Self::Simple(_), Self::Simple(_)) | (Self::Info(_), Self::Info(_)) => {
                self.to_raw() == other.to_raw()
            }
            _ => false,
        }
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Ignore => f.write_str("Ignore"),
            Self::Simple(_) => write!(f, "Simple({:#x})", self.to_raw()),
            Self::Info(_) => write!(f, "Info({:#x})", self.to_raw()),
        }
    }
}

bitflags! {
    /// `sa_flags` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: c_int {
        /// Do not generate `SIGCHLD` when children stop.
        const NO_CHILD_STOP = libc::SA_NOCLDSTOP;
        /// Do not turn terminated children into zombies.
        const NO_CHILD_WAIT = libc::SA_NOCLDWAIT;
        /// Handler receives `siginfo_t`. Managed by [`Flags::reconcile`].
        const SIGINFO = libc::SA_SIGINFO;
        /// Run the handler on the alternate signal stack.
        const ON_STACK = libc::SA_ONSTACK;
        /// Restart interruptible calls after the handler returns.
        const RESTART = libc::SA_RESTART;
        /// Do not block the signal while its handler runs.
        const NO_DEFER = libc::SA_NODEFER;
        /// Reset to the default action on entry to the handler.
        const RESET_HANDLER = libc::SA_RESETHAND;
    }
}

impl Flags {
    /// Forces `SIGINFO` on for [`Handler::Info`] and off for every other kind.
    #[must_use]
    pub fn reconcile(self, handler: &Handler) -> Self {
        if handler.wants_info() {
            self | Self::SIGINFO
        } else {
            self - Self::SIGINFO
        }
    }
}
