//! Wait-status decoding.
//!
//! A [`Status`] is the raw integer written by `waitpid`. Every accessor
//! re-derives its answer from that integer through the platform's own
//! `W*` macro equivalents in `libc`; no bit layout is hard-coded here.
//! Accessors whose guarding predicate is false return `None`.

use std::fmt;

use libc::c_int;

use crate::signal::Number;

/// Raw wait status of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(c_int);

impl Status {
    #[must_use]
    pub const fn from_raw(raw: c_int) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> c_int {
        self.0
    }

    /// The child terminated through `exit` or `_exit`.
    #[must_use]
    pub const fn exited(self) -> bool {
        libc::WIFEXITED(self.0)
    }

    /// The child was terminated by a signal.
    #[must_use]
    pub const fn signaled(self) -> bool {
        libc::WIFSIGNALED(self.0)
    }

    /// The child is stopped. Only reported under `REPORT_STOPPED`.
    #[must_use]
    pub const fn stopped(self) -> bool {
        libc::WIFSTOPPED(self.0)
    }

    /// The child was resumed by `SIGCONT`. Only reported under
    /// `REPORT_CONTINUED`.
    #[must_use]
    pub const fn continued(self) -> bool {
        libc::WIFCONTINUED(self.0)
    }

    /// Exit code, when [`exited`](Self::exited).
    #[must_use]
    pub const fn exit_code(self) -> Option<i32> {
        if self.exited() {
            Some(libc::WEXITSTATUS(self.0))
        } else {
            None
        }
    }

    /// Terminating signal, when [`signaled`](Self::signaled).
    #[must_use]
    pub const fn terminating_signal(self) -> Option<Number> {
        if self.signaled() {
            Some(Number::from_raw(libc::WTERMSIG(self.0)))
        } else {
            None
        }
    }

    /// Stop signal, when [`stopped`](Self::stopped).
    #[must_use]
    pub const fn stop_signal(self) -> Option<Number> {
        if self.stopped() {
            Some(Number::from_raw(libc::WSTOPSIG(self.0)))
        } else {
            None
        }
    }

    /// Whether a signal termination produced a core dump.
    ///
    /// Always `false` when the child was not signaled, and on platforms
    /// without `WCOREDUMP`.
    #[must_use]
    pub const fn core_dumped(self) -> bool {
        self.signaled() && core_dump_bit(self.0)
    }

    /// Reduces the four predicates to one value, checked in the order
    /// exited, signaled, stopped, continued.
    #[must_use]
    pub const fn classification(self) -> Classification {
        if let Some(code) = self.exit_code() {
            Classification::Exited(code)
        } else if let Some(signal) = self.terminating_signal() {
            Classification::Signaled {
                signal,
                core_dumped: self.core_dumped(),
            }
        } else if let Some(signal) = self.stop_signal() {
            Classification::Stopped(signal)
        } else if self.continued() {
            Classification::Continued
        } else {
            Classification::Unknown
        }
    }
}

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "freebsd",
    target_vendor = "apple"
))]
const fn core_dump_bit(raw: c_int) -> bool {
    libc::WCOREDUMP(raw)
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "freebsd",
    target_vendor = "apple"
)))]
const fn core_dump_bit(_raw: c_int) -> bool {
    false
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (raw {:#x})", self.classification(), self.0)
    }
}

/// What happened to a child, as one closed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Exited(i32),
    Signaled {
        signal: Number,
        core_dumped: bool,
    },
    Stopped(Number),
    Continued,
    /// No predicate matched. The kernel never produces this.
    Unknown,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with code {code}"),
            Self::Signaled {
                signal,
                core_dumped: true,
            } => write!(f, "killed by {signal} (core dumped)"),
            Self::Signaled { signal, .. } => write!(f, "killed by {signal}"),
            Self::Stopped(signal) => write!(f, "stopped by {signal}"),
            Self::Continued => f.write_str("continued"),
            Self::Unknown => f.write_str("unknown status"),
        }
    }
}
