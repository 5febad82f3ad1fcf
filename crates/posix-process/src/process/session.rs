//! Sessions.

use crate::process::{Error, Process, SessionId};
use crate::sys;

/// Makes the caller the leader of a new session and of a new process group
/// in it, with no controlling terminal.
///
/// Fails with `EPERM` (no permission) when the caller already leads a
/// process group, which includes having created a session before.
pub fn create() -> Result<SessionId, Error> {
    let sid = sys::setsid().map_err(Error::Session)?;
    log::debug!("created session {sid}");
    Ok(SessionId::new(sid))
}

/// Session id of `process`.
pub fn id(process: Process) -> Result<SessionId, Error> {
    let pid = process.to_raw().map_err(Error::Session)?;
    sys::getsid(pid).map(SessionId::new).map_err(Error::Session)
}
