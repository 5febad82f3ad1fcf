//! Child collection with `waitpid`.
//!
//! Per child, from the parent's side:
//!
//! ```text
//! Running -> (Stopped <-> Running)* -> Terminated -> Collected
//! ```
//!
//! Each call makes exactly one collection attempt. Collecting a terminated
//! child releases it; a later wait naming the same id fails with
//! `ECHILD` (no such process).

pub use posix_process_core::process::wait::{Options, Selector, StateChange};

use crate::process::{Error, ProcessId, Status};
use crate::sys;

/// Collects one state change among the children `selector` names.
///
/// - Without [`Options::NO_HANG`], blocks until an eligible child changes
///   state.
/// - With it, returns `Ok(None)` when no eligible child has anything to
///   report. That is not an error.
/// - Stops are only reported under [`Options::REPORT_STOPPED`],
///   resumptions only under [`Options::REPORT_CONTINUED`].
///
/// Fails with `ECHILD` when no eligible child exists at all, and with
/// `EINTR` when a signal interrupts the blocking wait. Neither is retried.
pub fn wait(selector: Selector, options: Options) -> Result<Option<StateChange>, Error> {
    let pid = selector.to_raw().map_err(Error::Wait)?;
    let (changed, raw) = sys::waitpid(pid, options.to_raw()).map_err(Error::Wait)?;
    if changed == 0 {
        log::trace!("wait({selector:?}, {options:?}): nothing ready");
        return Ok(None);
    }
    let change = StateChange {
        process: ProcessId::new(changed),
        status: Status::from_raw(raw),
    };
    log::debug!("collected {}: {}", change.process, change.status);
    Ok(Some(change))
}

/// Blocks until `process` terminates; stops are not reported.
pub fn child(process: ProcessId) -> Result<Status, Error> {
    blocking(Selector::Process(process)).map(|change| change.status)
}

/// Blocks until any child terminates.
pub fn any() -> Result<StateChange, Error> {
    blocking(Selector::Any)
}

// A blocking waitpid always names the child it collected.
fn blocking(selector: Selector) -> Result<StateChange, Error> {
    let pid = selector.to_raw().map_err(Error::Wait)?;
    let (changed, raw) = sys::waitpid(pid, Options::empty().to_raw()).map_err(Error::Wait)?;
    let change = StateChange {
        process: ProcessId::new(changed),
        status: Status::from_raw(raw),
    };
    log::debug!("collected {}: {}", change.process, change.status);
    Ok(change)
}
