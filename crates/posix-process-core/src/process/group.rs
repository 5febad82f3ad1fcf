//! Process-group membership targets.

use libc::pid_t;

use crate::errno::Errno;
use crate::process::id::GroupId;

/// The group a process is moved into by `setpgid`.
///
/// `Same` makes the process the leader of a group whose id equals its own
/// process id; it replaces the raw `pgid == 0` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Same,
    Id(GroupId),
}

impl Target {
    /// Raw `pgid` argument for `setpgid`.
    pub const fn to_raw(self) -> Result<pid_t, Errno> {
        match self {
            Self::Same => Ok(0),
            Self::Id(id) if id.raw() > 0 => Ok(id.raw()),
            Self::Id(_) => Err(Errno::EINVAL),
        }
    }
}

impl From<GroupId> for Target {
    fn from(id: GroupId) -> Self {
        Self::Id(id)
    }
}
