//! Process-subsystem errors.

use thiserror::Error;

use crate::errno::{Errno, Semantic};

/// Which process operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Fork,
    Execute,
    Wait,
    Kill,
    Session,
    Group,
    Spawn,
}

/// A failed process operation, carrying the platform code it failed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("fork failed: {0}")]
    Fork(Errno),
    #[error("execute failed: {0}")]
    Execute(Errno),
    #[error("wait failed: {0}")]
    Wait(Errno),
    #[error("kill failed: {0}")]
    Kill(Errno),
    #[error("session operation failed: {0}")]
    Session(Errno),
    #[error("process group operation failed: {0}")]
    Group(Errno),
    #[error("spawn failed: {0}")]
    Spawn(Errno),
}

impl Error {
    #[must_use]
    pub const fn new(kind: Kind, errno: Errno) -> Self {
        match kind {
            Kind::Fork => Self::Fork(errno),
            Kind::Execute => Self::Execute(errno),
            Kind::Wait => Self::Wait(errno),
            Kind::Kill => Self::Kill(errno),
            Kind::Session => Self::Session(errno),
            Kind::Group => Self::Group(errno),
            Kind::Spawn => Self::Spawn(errno),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Fork(_) => Kind::Fork,
            Self::Execute(_) => Kind::Execute,
            Self::Wait(_) => Kind::Wait,
            Self::Kill(_) => Kind::Kill,
            Self::Session(_) => Kind::Session,
            Self::Group(_) => Kind::Group,
            Self::Spawn(_) => Kind::Spawn,
        }
    }

    #[must_use]
    pub const fn errno(&self) -> Errno {
        match *self {
            Self::Fork(e)
            | Self::Execute(e)
            | Self::Wait(e)
            | Self::Kill(e)
            | Self::Session(e)
            | Self::Group(e)
            | Self::Spawn(e) => e,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_constructor() {
        for kind in [
            Kind::Fork,
            Kind::Execute,
            Kind::Wait,
            Kind::Kill,
            Kind::Session,
            Kind::Group,
            Kind::Spawn,
        ] {
            let err = Error::new(kind, Errno::EAGAIN);
            assert_eq!(err.kind(), kind);
            assert_eq!(err.errno(), Errno::EAGAIN);
        }
    }

    #[test]
    fn semantic_follows_errno() {
        assert_eq!(
            Error::Wait(Errno::ECHILD).semantic(),
            Some(Semantic::NoSuchProcess)
        );
        assert_eq!(
            Error::Session(Errno::EPERM).semantic(),
            Some(Semantic::NoPermission)
        );
        assert_eq!(Error::Execute(Errno::ENOENT).semantic(), None);
    }

    #[test]
    fn display_names_the_operation() {
        let text = Error::Spawn(Errno::ENOENT).to_string();
        assert!(text.starts_with("spawn failed: ENOENT"), "{text}");
    }
}
