//! Direct process creation with `posix_spawn`.
//!
//! Spawning never duplicates the caller's address space, so unlike
//! [`fork`](super::fork) it is safe from a multithreaded program.

use std::ffi::CStr;

use crate::process::strings::{Program, Strings};
use crate::process::{Error, ProcessId};
use crate::sys;

/// Starts `path` with the given argument and environment vectors and
/// returns the new process's id.
///
/// Fails with the same codes as [`execute`](super::execute): `ENOENT`,
/// `EACCES`, `ENOEXEC`, `ENOMEM`, `E2BIG`. The code is taken from the
/// call's own return value.
pub fn spawn(path: &CStr, arguments: &Strings, environment: &Strings) -> Result<ProcessId, Error> {
    // SAFETY: both vectors are NULL-terminated and borrowed for the call.
    #[allow(unsafe_code)]
    let spawned = unsafe { sys::posix_spawn(path, arguments.as_ptr(), environment.as_ptr()) };
    match spawned {
        Ok(pid) => {
            log::debug!("spawned {path:?} as {pid}");
            Ok(ProcessId::new(pid))
        }
        Err(errno) => {
            log::debug!("spawn of {path:?} failed: {errno}");
            Err(Error::Spawn(errno))
        }
    }
}

impl Program {
    /// Starts this program. See [`spawn`].
    pub fn spawn(&self) -> Result<ProcessId, Error> {
        spawn(self.path(), self.arguments(), self.environment())
    }
}
