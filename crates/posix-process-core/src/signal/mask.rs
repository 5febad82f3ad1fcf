//! Thread signal-mask change modes.

use libc::c_int;

/// How `pthread_sigmask` combines the given set with the current mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum How {
    /// Add the set to the mask.
    Block,
    /// Remove the set from the mask.
    Unblock,
    /// Make the set the entire mask.
    Replace,
}

impl How {
    #[must_use]
    pub const fn to_raw(self) -> c_int {
        match self {
            Self::Block => libc::SIG_BLOCK,
            Self::Unblock => libc::SIG_UNBLOCK,
            Self::Replace => libc::SIG_SETMASK,
        }
    }
}
