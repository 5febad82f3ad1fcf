//! Argument and environment vectors in the shape `execve` expects.
//!
//! [`Strings`] owns its C strings together with a NULL-terminated pointer
//! array over them, so a vector can be built before `fork` and handed to
//! `execve` in the child without allocating there.

use std::ffi::{CStr, CString, NulError};
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::ptr;

use libc::c_char;

/// An owned, NULL-terminated array of C strings.
pub struct Strings {
    owned: Vec<CString>,
    pointers: Vec<*const c_char>,
}

impl Strings {
    /// Builds the vector, failing on the first item with an interior NUL.
    pub fn new<I, S>(items: I) -> Result<Self, NulError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        let owned = items
            .into_iter()
            .map(CString::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_owned(owned))
    }

    /// An empty vector: just the terminating NULL.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_owned(Vec::new())
    }

    /// `KEY=VALUE` entries of the calling process's environment.
    #[must_use]
    pub fn from_current_environment() -> Self {
        let owned = std::env::vars_os()
            .filter_map(|(key, value)| {
                let mut entry = Vec::with_capacity(key.len() + 1 + value.len());
                entry.extend_from_slice(key.as_bytes());
                entry.push(b'=');
                entry.extend_from_slice(value.as_bytes());
                // The OS environment cannot hold NULs.
                CString::new(entry).ok()
            })
            .collect();
        Self::from_owned(owned)
    }

    fn from_owned(owned: Vec<CString>) -> Self {
        let pointers = owned
            .iter()
            .map(|s| s.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();
        Self { owned, pointers }
    }

    /// Number of strings, not counting the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CStr> {
        self.owned.iter().map(CString::as_c_str)
    }

    /// Pointer to the NULL-terminated array. Valid while `self` is alive;
    /// moving `self` does not move the strings.
    pub(crate) fn as_ptr(&self) -> *const *const c_char {
        self.pointers.as_ptr()
    }
}

impl fmt::Debug for Strings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.owned.iter()).finish()
    }
}

impl Clone for Strings {
    fn clone(&self) -> Self {
        Self::from_owned(self.owned.clone())
    }
}

/// A program image to start: executable path, arguments and environment.
#[derive(Debug, Clone)]
pub struct Program {
    path: CString,
    arguments: Strings,
    environment: Strings,
}

impl Program {
    /// `arguments` conventionally starts with the program's display name.
    pub fn new<P>(path: P, arguments: Strings, environment: Strings) -> Result<Self, NulError>
    where
        P: Into<Vec<u8>>,
    {
        Ok(Self {
            path: CString::new(path)?,
            arguments,
            environment,
        })
    }

    /// `/bin/sh -c command` with the caller's environment.
    pub fn shell(command: &str) -> Result<Self, NulError> {
        Self::new(
            "/bin/sh",
            Strings::new(["sh", "-c", command])?,
            Strings::from_current_environment(),
        )
    }

    #[must_use]
    pub fn path(&self) -> &CStr {
        &self.path
    }

    #[must_use]
    pub fn arguments(&self) -> &Strings {
        &self.arguments
    }

    #[must_use]
    pub fn environment(&self) -> &Strings {
        &self.environment
    }
}
