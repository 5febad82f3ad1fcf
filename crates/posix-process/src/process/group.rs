//! Process-group membership.

pub use posix_process_core::process::group::Target;

use crate::process::{Error, GroupId, Process};
use crate::sys;

/// Moves `process` into the group `target` names.
///
/// `set(Process::Current, Target::Same)` makes the caller a group leader.
pub fn set(process: Process, target: Target) -> Result<(), Error> {
    let pid = process.to_raw().map_err(Error::Group)?;
    let pgid = target.to_raw().map_err(Error::Group)?;
    sys::setpgid(pid, pgid).map_err(Error::Group)?;
    log::debug!("moved {process:?} to group {target:?}");
    Ok(())
}

/// Group id of `process`.
pub fn id(process: Process) -> Result<GroupId, Error> {
    let pid = process.to_raw().map_err(Error::Group)?;
    sys::getpgid(pid).map(GroupId::new).map_err(Error::Group)
}
