//! Signal dispositions.
//!
//! Dispositions are process-wide: installing one affects every thread.
//! Nothing here synchronizes concurrent installers for the same signal;
//! callers that install from several threads must coordinate themselves.

pub use posix_process_core::signal::{Flags, Handler, InfoHandler, SimpleHandler};

use crate::signal::{Error, Number, Set};
use crate::sys;

/// A complete disposition: handler, signals blocked while it runs, flags.
///
/// `Flags::SIGINFO` is present exactly when the handler is
/// [`Handler::Info`]. The constructor enforces this, and it holds for
/// values read back from the kernel as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    handler: Handler,
    mask: Set,
    flags: Flags,
}

impl Configuration {
    #[must_use]
    pub fn new(handler: Handler, mask: Set, flags: Flags) -> Self {
        Self {
            flags: flags.reconcile(&handler),
            handler,
            mask,
        }
    }

    /// `handler` with an empty mask and no flags.
    #[must_use]
    pub fn with_handler(handler: Handler) -> Self {
        Self::new(handler, Set::empty(), Flags::empty())
    }

    #[must_use]
    pub fn handler(&self) -> Handler {
        self.handler
    }

    #[must_use]
    pub fn mask(&self) -> &Set {
        &self.mask
    }

    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    fn to_raw(self) -> libc::sigaction {
        sys::new_sigaction(
            self.handler.to_raw(),
            *self.mask.as_raw(),
            self.flags.bits(),
        )
    }

    // Bits outside `Flags` (such as the libc-managed `SA_RESTORER`) are
    // dropped; libc re-adds them on install.
    fn from_raw(raw: &libc::sigaction) -> Self {
        let flags = Flags::from_bits_truncate(raw.sa_flags);
        let handler = sys::handler_from_raw(raw.sa_sigaction, flags.contains(Flags::SIGINFO));
        Self::new(handler, Set::from_raw(raw.sa_mask), flags)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::with_handler(Handler::Default)
    }
}

/// Installs `configuration` for `signal` and returns the previous
/// disposition, so it can be reinstalled later.
///
/// # Safety
///
/// A [`Handler::Simple`] or [`Handler::Info`] body runs in signal context
/// and must only perform async-signal-safe operations: no allocation, no
/// locks, no stdio, no logging. It may interrupt any code in the process,
/// including code holding the allocator's lock.
#[allow(unsafe_code)]
pub unsafe fn set(signal: Number, configuration: &Configuration) -> Result<Configuration, Error> {
    let raw = configuration.to_raw();
    // SAFETY: the handler contract is forwarded to our caller.
    let previous = unsafe { sys::sigaction_install(signal.raw(), &raw) }.map_err(Error::Action)?;
    log::debug!("installed {:?} for {signal}", configuration.handler);
    Ok(Configuration::from_raw(&previous))
}

/// Current disposition of `signal`, without changing it.
pub fn get(signal: Number) -> Result<Configuration, Error> {
    sys::sigaction_query(signal.raw())
        .map(|raw| Configuration::from_raw(&raw))
        .map_err(Error::Action)
}
