//! Signal identity.

use std::fmt;

use libc::c_int;

/// A signal number.
///
/// Named constants cover the standard POSIX signals; [`Number::from_raw`]
/// admits platform-specific ones such as real-time signals. No ordering is
/// implied between signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Number(c_int);

impl Number {
    pub const HUP: Self = Self(libc::SIGHUP);
    pub const INT: Self = Self(libc::SIGINT);
    pub const QUIT: Self = Self(libc::SIGQUIT);
    pub const ILL: Self = Self(libc::SIGILL);
    pub const TRAP: Self = Self(libc::SIGTRAP);
    pub const ABRT: Self = Self(libc::SIGABRT);
    pub const BUS: Self = Self(libc::SIGBUS);
    pub const FPE: Self = Self(libc::SIGFPE);
    pub const KILL: Self = Self(libc::SIGKILL);
    pub const USR1: Self = Self(libc::SIGUSR1);
    pub const SEGV: Self = Self(libc::SIGSEGV);
    pub const USR2: Self = Self(libc::SIGUSR2);
    pub const PIPE: Self = Self(libc::SIGPIPE);
    pub const ALRM: Self = Self(libc::SIGALRM);
    pub const TERM: Self = Self(libc::SIGTERM);
    pub const CHLD: Self = Self(libc::SIGCHLD);
    pub const CONT: Self = Self(libc::SIGCONT);
    pub const STOP: Self = Self(libc::SIGSTOP);
    pub const TSTP: Self = Self(libc::SIGTSTP);
    pub const TTIN: Self = Self(libc::SIGTTIN);
    pub const TTOU: Self = Self(libc::SIGTTOU);
    pub const URG: Self = Self(libc::SIGURG);
    pub const XCPU: Self = Self(libc::SIGXCPU);
    pub const XFSZ: Self = Self(libc::SIGXFSZ);
    pub const VTALRM: Self = Self(libc::SIGVTALRM);
    pub const PROF: Self = Self(libc::SIGPROF);
    pub const WINCH: Self = Self(libc::SIGWINCH);
    pub const SYS: Self = Self(libc::SIGSYS);

    /// Every named signal.
    pub const ALL: [Self; 28] = [
        Self::HUP,
        Self::INT,
        Self::QUIT,
        Self::ILL,
        Self::TRAP,
        Self::ABRT,
        Self::BUS,
        Self::FPE,
        Self::KILL,
        Self::USR1,
        Self::SEGV,
        Self::USR2,
        Self::PIPE,
        Self::ALRM,
        Self::TERM,
        Self::CHLD,
        Self::CONT,
        Self::STOP,
        Self::TSTP,
        Self::TTIN,
        Self::TTOU,
        Self::URG,
        Self::XCPU,
        Self::XFSZ,
        Self::VTALRM,
        Self::PROF,
        Self::WINCH,
        Self::SYS,
    ];

    /// Escape hatch for signals without a named constant.
    #[must_use]
    pub const fn from_raw(raw: c_int) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> c_int {
        self.0
    }

    /// `SIGKILL` and `SIGSTOP` cannot be caught, blocked or ignored.
    #[must_use]
    pub const fn catchable(self) -> bool {
        self.0 != libc::SIGKILL && self.0 != libc::SIGSTOP
    }

    /// Conventional `SIG*` name of a named signal.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            libc::SIGHUP => "SIGHUP",
            libc::SIGINT => "SIGINT",
            libc::SIGQUIT => "SIGQUIT",
            libc::SIGILL => "SIGILL",
            libc::SIGTRAP => "SIGTRAP",
            libc::SIGABRT => "SIGABRT",
            libc::SIGBUS => "SIGBUS",
            libc::SIGFPE => "SIGFPE",
            libc::SIGKILL => "SIGKILL",
            libc::SIGUSR1 => "SIGUSR1",
            libc::SIGSEGV => "SIGSEGV",
            libc::SIGUSR2 => "SIGUSR2",
            libc::SIGPIPE => "SIGPIPE",
            libc::SIGALRM => "SIGALRM",
            libc::SIGTERM => "SIGTERM",
            libc::SIGCHLD => "SIGCHLD",
            libc::SIGCONT => "SIGCONT",
            libc::SIGSTOP => "SIGSTOP",
            libc::SIGTSTP => "SIGTSTP",
            libc::SIGTTIN => "SIGTTIN",
            libc::SIGTTOU => "SIGTTOU",
            libc::SIGURG => "SIGURG",
            libc::SIGXCPU => "SIGXCPU",
            libc::SIGXFSZ => "SIGXFSZ",
            libc::SIGVTALRM => "SIGVTALRM",
            libc::SIGPROF => "SIGPROF",
            libc::SIGWINCH => "SIGWINCH",
            libc::SIGSYS => "SIGSYS",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "signal {}", self.0),
        }
    }
}
