//! In-place image replacement with `execve`.

use std::convert::Infallible;
use std::ffi::CStr;

use crate::process::Error;
use crate::process::strings::{Program, Strings};
use crate::sys;

/// Replaces the calling process's image with `path`.
///
/// Never returns on success: the calling code and all in-process state are
/// gone. A return is always a failure, so the result type is
/// `Result<Infallible, Error>`.
///
/// This is safe to call between [`fork`](super::fork) and exit in the
/// child: nothing is allocated here, the vectors are already built.
pub fn execute(
    path: &CStr,
    arguments: &Strings,
    environment: &Strings,
) -> Result<Infallible, Error> {
    // SAFETY: both vectors are NULL-terminated and borrowed for the call.
    #[allow(unsafe_code)]
    let errno = unsafe { sys::execve(path, arguments.as_ptr(), environment.as_ptr()) };
    Err(Error::Execute(errno))
}

impl Program {
    /// Replaces the calling process with this program. See [`execute`].
    pub fn execute(&self) -> Result<Infallible, Error> {
        execute(self.path(), self.arguments(), self.environment())
    }
}
