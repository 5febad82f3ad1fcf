//! Handler installation and delivery.
//!
//! Dispositions are process-wide, so each test owns a distinct signal and
//! puts the previous disposition back before returning.

#![allow(unsafe_code)]

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use libc::{c_int, c_void, siginfo_t};
use posix_process::process::{self, ForkOutcome, Status, wait};
use posix_process::signal::action::{self, Configuration, Flags, Handler};
use posix_process::signal::mask::{self, How};
use posix_process::signal::{self, Kind, Number, Set, send};

fn eventually(check: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    check()
}

fn in_child(body: fn() -> i32) -> Status {
    // SAFETY: bodies make raw system calls only, then the child exits.
    match unsafe { process::fork() }.unwrap() {
        ForkOutcome::Child => process::exit_immediately(body()),
        ForkOutcome::Parent(pid) => wait::child(pid).unwrap(),
    }
}

static USR1_SEEN: AtomicBool = AtomicBool::new(false);

extern "C" fn on_usr1(_: c_int) {
    USR1_SEEN.store(true, Ordering::SeqCst);
}

#[test]
fn simple_handler_runs_on_self_directed_signal() {
    // RESTART: other tests block in waitpid while this signal is in flight.
    let config = Configuration::new(Handler::Simple(on_usr1), Set::empty(), Flags::RESTART);
    // SAFETY: the handler only stores to an atomic.
    let previous = unsafe { action::set(Number::USR1, &config) }.unwrap();
    assert_eq!(previous.handler(), Handler::Default);

    send::to_self(Number::USR1).unwrap();
    assert!(eventually(|| USR1_SEEN.load(Ordering::SeqCst)));

    // SAFETY: restoring the default disposition.
    let replaced = unsafe { action::set(Number::USR1, &previous) }.unwrap();
    assert_eq!(replaced.handler(), Handler::Simple(on_usr1));
    assert_eq!(
        action::get(Number::USR1).unwrap().handler(),
        Handler::Default
    );
}

static USR2_SIGNO: AtomicI32 = AtomicI32::new(0);

extern "C" fn on_usr2(signal: c_int, info: *mut siginfo_t, _: *mut c_void) {
    // SAFETY: the kernel passes a valid siginfo for SA_SIGINFO handlers.
    let signo = if info.is_null() {
        -1
    } else {
        unsafe { (*info).si_signo }
    };
    let seen = if signo == signal { signo } else { -signo };
    USR2_SIGNO.store(seen, Ordering::SeqCst);
}

#[test]
fn info_handler_receives_signal_details() {
    let config = Configuration::new(Handler::Info(on_usr2), Set::empty(), Flags::RESTART);
    assert!(config.flags().contains(Flags::SIGINFO));
    // SAFETY: the handler only stores to an atomic.
    let previous = unsafe { action::set(Number::USR2, &config) }.unwrap();

    let installed = action::get(Number::USR2).unwrap();
    assert_eq!(installed.handler(), Handler::Info(on_usr2));
    assert!(installed.flags().contains(Flags::SIGINFO | Flags::RESTART));

    send::to_self(Number::USR2).unwrap();
    assert!(eventually(|| USR2_SIGNO.load(Ordering::SeqCst) != 0));
    assert_eq!(USR2_SIGNO.load(Ordering::SeqCst), Number::USR2.raw());

    // SAFETY: restoring the previous disposition.
    unsafe { action::set(Number::USR2, &previous) }.unwrap();
}

extern "C" fn never_runs(_: c_int) {}

#[test]
fn installed_mask_and_flags_read_back_unchanged() {
    let mask = Set::try_from_signals([Number::TERM, Number::INT]).unwrap();
    let config = Configuration::new(
        Handler::Simple(never_runs),
        mask,
        Flags::RESTART | Flags::NO_DEFER,
    );
    // SAFETY: VTALRM is never raised here and the handler does nothing.
    let previous = unsafe { action::set(Number::VTALRM, &config) }.unwrap();
    assert_eq!(action::get(Number::VTALRM).unwrap(), config);

    // SAFETY: restoring the previous disposition.
    unsafe { action::set(Number::VTALRM, &previous) }.unwrap();
    assert_eq!(action::get(Number::VTALRM).unwrap(), previous);
}

#[test]
fn ignored_signal_is_discarded() {
    let config = Configuration::with_handler(Handler::Ignore);
    // SAFETY: no handler body is involved.
    let previous = unsafe { action::set(Number::ALRM, &config) }.unwrap();
    assert_eq!(
        action::get(Number::ALRM).unwrap().handler(),
        Handler::Ignore
    );

    send::to_self(Number::ALRM).unwrap();
    thread::sleep(Duration::from_millis(20));

    // SAFETY: restoring the previous disposition.
    unsafe { action::set(Number::ALRM, &previous) }.unwrap();
}

#[test]
fn blocked_signal_stays_pending() {
    let status = in_child(|| {
        let Ok(set) = Set::try_from_signals([Number::USR1]) else {
            return 10;
        };
        if mask::change(How::Block, &set).is_err() {
            return 11;
        }
        if send::to_self(Number::USR1).is_err() {
            return 12;
        }
        match mask::pending() {
            Ok(pending) if pending.contains(Number::USR1) == Ok(true) => 0,
            Ok(_) => 13,
            Err(_) => 14,
        }
    });
    assert_eq!(status.exit_code(), Some(0));
}

extern "C" fn wake(_: c_int) {}

#[test]
fn suspend_returns_interrupted_after_handler() {
    let status = in_child(|| {
        let config = Configuration::with_handler(Handler::Simple(wake));
        // SAFETY: `wake` does nothing.
        if unsafe { action::set(Number::USR1, &config) }.is_err() {
            return 10;
        }
        let Ok(set) = Set::try_from_signals([Number::USR1]) else {
            return 11;
        };
        let Ok(previous) = mask::change(How::Block, &set) else {
            return 12;
        };
        if send::to_self(Number::USR1).is_err() {
            return 13;
        }
        let mut waiting = previous;
        if waiting.remove(Number::USR1).is_err() {
            return 14;
        }
        match signal::suspend(&waiting) {
            Err(err) if err.kind() == Kind::Interrupted => 0,
            Err(_) => 15,
            Ok(never) => match never {},
        }
    });
    assert_eq!(status.exit_code(), Some(0));
}

#[test]
fn signal_to_group_reaches_every_member() {
    let program = process::Program::shell("exec sleep 30").unwrap();
    // SAFETY: the child calls setpgid, execute and `_exit` only.
    match unsafe { process::fork() }.unwrap() {
        ForkOutcome::Child => {
            let _ = process::group::set(process::Process::Current, process::group::Target::Same);
            let _ = program.execute();
            process::exit_immediately(127);
        }
        ForkOutcome::Parent(pid) => {
            // EACCES: the child already exec'd, having joined its group first.
            let _ = process::group::set(process::Process::Id(pid), process::group::Target::Same);
            send::to_group(process::GroupId::new(pid.raw()), Number::TERM).unwrap();
            let status = wait::child(pid).unwrap();
            assert_eq!(status.terminating_signal(), Some(Number::TERM));
        }
    }
}
