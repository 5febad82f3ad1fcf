//! Thin wrappers over the libc calls this crate makes.
//!
//! Every wrapper captures the error number directly after the call it
//! wraps, before anything else runs. Calls that report their error as the
//! return value (`posix_spawn`, `pthread_sigmask`) take it from there
//! instead of from `errno`.
//!
//! This is the only module in the crate that contains `unsafe` code.

use std::ffi::CStr;
use std::mem::{self, MaybeUninit};
use std::ptr;

use libc::{c_char, c_int, pid_t, sighandler_t, sigset_t};
use posix_process_core::errno::Errno;
use posix_process_core::signal::{Handler, InfoHandler, SimpleHandler};

#[inline]
fn check(rc: c_int) -> Result<c_int, Errno> {
    if rc == -1 { Err(Errno::last()) } else { Ok(rc) }
}

#[inline]
fn check_pid(rc: pid_t) -> Result<pid_t, Errno> {
    if rc == -1 { Err(Errno::last()) } else { Ok(rc) }
}

// -------------------------------------------------------------------------
// Process creation
// -------------------------------------------------------------------------

/// `fork()`.
///
/// # Safety
///
/// In a multithreaded caller the child may only perform async-signal-safe
/// operations until it execs or exits.
pub(crate) unsafe fn fork() -> Result<pid_t, Errno> {
    // SAFETY: the caller accepts the child-side restrictions above.
    check_pid(unsafe { libc::fork() })
}

/// `_exit(code)`.
pub(crate) fn exit_immediately(code: c_int) -> ! {
    // SAFETY: `_exit` is async-signal-safe and touches no process state
    // that Rust relies on afterwards, since it does not return.
    unsafe { libc::_exit(code) }
}

/// `execve(path, argv, envp)`. Only returns on failure.
///
/// # Safety
///
/// `argv` and `envp` must be NULL-terminated arrays of pointers to
/// NUL-terminated strings that stay valid for the duration of the call.
pub(crate) unsafe fn execve(
    path: &CStr,
    argv: *const *const c_char,
    envp: *const *const c_char,
) -> Errno {
    // SAFETY: `path` is a valid C string; the arrays are the caller's
    // responsibility.
    unsafe { libc::execve(path.as_ptr(), argv, envp) };
    Errno::last()
}

/// `posix_spawn(&pid, path, NULL, NULL, argv, envp)`.
///
/// # Safety
///
/// Same array requirements as [`execve`].
pub(crate) unsafe fn posix_spawn(
    path: &CStr,
    argv: *const *const c_char,
    envp: *const *const c_char,
) -> Result<pid_t, Errno> {
    let mut pid: pid_t = 0;
    // SAFETY: `pid` is a valid out-pointer, null file actions and
    // attributes select the defaults, and `posix_spawn` never writes
    // through `argv`/`envp` despite the `*mut` in its prototype.
    let rc = unsafe {
        libc::posix_spawn(
            &mut pid,
            path.as_ptr(),
            ptr::null(),
            ptr::null(),
            argv.cast::<*mut c_char>(),
            envp.cast::<*mut c_char>(),
        )
    };
    if rc == 0 {
        Ok(pid)
    } else {
        Err(Errno::from_raw(rc))
    }
}

// -------------------------------------------------------------------------
// Waiting, killing, groups, sessions
// -------------------------------------------------------------------------

/// `waitpid(pid, &status, options)`, returning `(pid, status)`.
pub(crate) fn waitpid(pid: pid_t, options: c_int) -> Result<(pid_t, c_int), Errno> {
    let mut status: c_int = 0;
    // SAFETY: `status` is a valid out-pointer for the duration of the call.
    let rc = check_pid(unsafe { libc::waitpid(pid, &mut status, options) })?;
    Ok((rc, status))
}

/// `kill(pid, sig)`.
pub(crate) fn kill(pid: pid_t, sig: c_int) -> Result<(), Errno> {
    // SAFETY: `kill` takes no pointers.
    check(unsafe { libc::kill(pid, sig) }).map(drop)
}

/// `setpgid(pid, pgid)`.
pub(crate) fn setpgid(pid: pid_t, pgid: pid_t) -> Result<(), Errno> {
    // SAFETY: `setpgid` takes no pointers.
    check(unsafe { libc::setpgid(pid, pgid) }).map(drop)
}

/// `getpgid(pid)`.
pub(crate) fn getpgid(pid: pid_t) -> Result<pid_t, Errno> {
    // SAFETY: `getpgid` takes no pointers.
    check_pid(unsafe { libc::getpgid(pid) })
}

/// `setsid()`.
pub(crate) fn setsid() -> Result<pid_t, Errno> {
    // SAFETY: `setsid` takes no arguments.
    check_pid(unsafe { libc::setsid() })
}

/// `getsid(pid)`.
pub(crate) fn getsid(pid: pid_t) -> Result<pid_t, Errno> {
    // SAFETY: `getsid` takes no pointers.
    check_pid(unsafe { libc::getsid(pid) })
}

// -------------------------------------------------------------------------
// Signal sets
// -------------------------------------------------------------------------

pub(crate) fn sigemptyset() -> sigset_t {
    let mut set = MaybeUninit::<sigset_t>::uninit();
    // SAFETY: `sigemptyset` initializes the whole set and cannot fail on a
    // valid pointer.
    unsafe {
        libc::sigemptyset(set.as_mut_ptr());
        set.assume_init()
    }
}

pub(crate) fn sigfillset() -> sigset_t {
    let mut set = MaybeUninit::<sigset_t>::uninit();
    // SAFETY: as for `sigemptyset`.
    unsafe {
        libc::sigfillset(set.as_mut_ptr());
        set.assume_init()
    }
}

pub(crate) fn sigaddset(set: &mut sigset_t, sig: c_int) -> Result<(), Errno> {
    // SAFETY: `set` is an initialized, exclusively borrowed sigset.
    check(unsafe { libc::sigaddset(set, sig) }).map(drop)
}

pub(crate) fn sigdelset(set: &mut sigset_t, sig: c_int) -> Result<(), Errno> {
    // SAFETY: as for `sigaddset`.
    check(unsafe { libc::sigdelset(set, sig) }).map(drop)
}

pub(crate) fn sigismember(set: &sigset_t, sig: c_int) -> Result<bool, Errno> {
    // SAFETY: `set` is an initialized sigset that is only read.
    check(unsafe { libc::sigismember(set, sig) }).map(|rc| rc == 1)
}

// -------------------------------------------------------------------------
// Masks
// -------------------------------------------------------------------------

/// `pthread_sigmask(how, set, &old)`. With `set == None` only queries.
pub(crate) fn pthread_sigmask(how: c_int, set: Option<&sigset_t>) -> Result<sigset_t, Errno> {
    let mut old = MaybeUninit::<sigset_t>::uninit();
    let set = set.map_or(ptr::null(), ptr::from_ref);
    // SAFETY: `set` is null or a valid sigset; `old` is a valid out-pointer.
    let rc = unsafe { libc::pthread_sigmask(how, set, old.as_mut_ptr()) };
    if rc != 0 {
        return Err(Errno::from_raw(rc));
    }
    // SAFETY: success means the previous mask was written to `old`.
    Ok(unsafe { old.assume_init() })
}

/// `sigpending(&set)`.
pub(crate) fn sigpending() -> Result<sigset_t, Errno> {
    let mut set = MaybeUninit::<sigset_t>::uninit();
    // SAFETY: `set` is a valid out-pointer.
    check(unsafe { libc::sigpending(set.as_mut_ptr()) })?;
    // SAFETY: success means the set was written.
    Ok(unsafe { set.assume_init() })
}

/// `sigsuspend(mask)`. Always fails; `EINTR` is the normal outcome.
pub(crate) fn sigsuspend(mask: &sigset_t) -> Errno {
    // SAFETY: `mask` is a valid sigset that is only read.
    unsafe { libc::sigsuspend(mask) };
    Errno::last()
}

// -------------------------------------------------------------------------
// Actions
// -------------------------------------------------------------------------

/// Builds a `struct sigaction` from its portable fields.
pub(crate) fn new_sigaction(
    handler: sighandler_t,
    mask: sigset_t,
    flags: c_int,
) -> libc::sigaction {
    // SAFETY: all-zero is a valid `struct sigaction` on every supported
    // platform (null handler, no restorer).
    let mut action: libc::sigaction = unsafe { mem::zeroed() };
    action.sa_sigaction = handler;
    action.sa_mask = mask;
    action.sa_flags = flags;
    action
}

/// `sigaction(sig, NULL, &old)`.
pub(crate) fn sigaction_query(sig: c_int) -> Result<libc::sigaction, Errno> {
    let mut old = MaybeUninit::<libc::sigaction>::uninit();
    // SAFETY: a null new action only queries; `old` is a valid out-pointer.
    check(unsafe { libc::sigaction(sig, ptr::null(), old.as_mut_ptr()) })?;
    // SAFETY: success means the current action was written.
    Ok(unsafe { old.assume_init() })
}

/// `sigaction(sig, &new, &old)`.
///
/// # Safety
///
/// Any handler in `new` must restrict itself to async-signal-safe work.
pub(crate) unsafe fn sigaction_install(
    sig: c_int,
    new: &libc::sigaction,
) -> Result<libc::sigaction, Errno> {
    let mut old = MaybeUninit::<libc::sigaction>::uninit();
    // SAFETY: `new` is a valid action; the handler contract is the caller's.
    check(unsafe { libc::sigaction(sig, new, old.as_mut_ptr()) })?;
    // SAFETY: success means the previous action was written.
    Ok(unsafe { old.assume_init() })
}

/// Reads a handler back out of a kernel-provided `sa_sigaction`.
pub(crate) fn handler_from_raw(raw: sighandler_t, siginfo: bool) -> Handler {
    match raw {
        libc::SIG_DFL => Handler::Default,
        libc::SIG_IGN => Handler::Ignore,
        // SAFETY (both arms): any other value was installed through
        // `sigaction` as a function pointer, of the shape `SA_SIGINFO`
        // records.
        addr if siginfo => {
            Handler::Info(unsafe { mem::transmute::<sighandler_t, InfoHandler>(addr) })
        }
        addr => Handler::Simple(unsafe { mem::transmute::<sighandler_t, SimpleHandler>(addr) }),
    }
}
