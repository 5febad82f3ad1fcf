//! Signal-subsystem errors.

use thiserror::Error;

use crate::errno::{Errno, Semantic};

/// Which signal operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Interrupted,
    Set,
    Mask,
    Action,
    Send,
}

/// A failed signal operation, carrying the platform code it failed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("interrupted by a signal: {0}")]
    Interrupted(Errno),
    #[error("signal set operation failed: {0}")]
    Set(Errno),
    #[error("signal mask change failed: {0}")]
    Mask(Errno),
    #[error("signal action failed: {0}")]
    Action(Errno),
    #[error("signal send failed: {0}")]
    Send(Errno),
}

impl Error {
    #[must_use]
    pub const fn new(kind: Kind, errno: Errno) -> Self {
        match kind {
            Kind::Interrupted => Self::Interrupted(errno),
            Kind::Set => Self::Set(errno),
            Kind::Mask => Self::Mask(errno),
            Kind::Action => Self::Action(errno),
            Kind::Send => Self::Send(errno),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Interrupted(_) => Kind::Interrupted,
            Self::Set(_) => Kind::Set,
            Self::Mask(_) => Kind::Mask,
            Self::Action(_) => Kind::Action,
            Self::Send(_) => Kind::Send,
        }
    }

    #[must_use]
    pub const fn errno(&self) -> Errno {
        match *self {
            Self::Interrupted(e)
            | Self::Set(e)
            | Self::Mask(e)
            | Self::Action(e)
            | Self::Send(e) => e,
        }
    }

    #[must_use]
    pub const fn semantic(&self) -> Option<Semantic> {
        self.errno().semantic()
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        err.errno().into()
    }
}
