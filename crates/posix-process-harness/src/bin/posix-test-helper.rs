//! Single-scenario helper for process-control tests.
//!
//! Each command performs one membership or lifecycle change on the helper
//! process itself and prints one report line (see
//! `posix_process_harness::protocol`). Tests spawn it so that session and
//! group changes never touch the test runner.

use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use posix_process::process::group::{self, Target};
use posix_process::process::{self, ForkOutcome, Process, ProcessId, session, wait};
use posix_process::signal::{Number, send};
use posix_process::{Errno, Semantic};
use posix_process_harness::config::{self, OutputFormat};
use posix_process_harness::protocol::Report;
use posix_process_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

#[derive(Debug, Parser)]
#[command(name = "posix-test-helper")]
#[command(about = "Performs one process-control scenario and reports it")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Exit with the given code.
    Exit {
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        code: i32,
    },
    /// Stop self with SIGSTOP, then exit with the given code once continued.
    StopExit {
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        code: i32,
    },
    /// Check that the parent id equals `ppid`.
    VerifyParent { ppid: i32 },
    /// Create a new session.
    CreateSession,
    /// Create a session twice; the second attempt must be refused.
    DoubleSetsid,
    /// Become leader of a new process group (current-process form).
    BecomeGroupLeader,
    /// Become leader of a new process group, naming self explicitly.
    SetpgidExplicit,
    /// Fork a child that exits with the given code and collect it.
    ForkExit {
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        code: i32,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Exit { .. } => "exit",
            Self::StopExit { .. } => "stop-exit",
            Self::VerifyParent { .. } => "verify-parent",
            Self::CreateSession => "create-session",
            Self::DoubleSetsid => "double-setsid",
            Self::BecomeGroupLeader => "become-group-leader",
            Self::SetpgidExplicit => "setpgid-explicit",
            Self::ForkExit { .. } => "fork-exit",
        }
    }
}

fn failure(errno: Errno, msg: &str) -> Report {
    Report::Failure {
        errno: errno.raw(),
        msg: msg.to_string(),
        details: Vec::new(),
    }
}

fn mismatch(msg: &str, details: [(&str, i32); 2]) -> Report {
    Report::Failure {
        errno: 0,
        msg: msg.to_string(),
        details: details
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.to_string()))
            .collect(),
    }
}

// The helper's identity as seen from inside.
fn status(exit: i32) -> Report {
    let lookup = || -> Result<Report, process::Error> {
        Ok(Report::Status {
            pid: ProcessId::current().raw(),
            ppid: ProcessId::parent().raw(),
            pgid: group::id(Process::Current)?.raw(),
            sid: session::id(Process::Current)?.raw(),
            exit,
        })
    };
    lookup().unwrap_or_else(|err| failure(err.errno(), "identity_lookup_failed"))
}

/// Runs `command` and returns the report plus the helper's exit code.
fn run(command: &Command) -> (Report, i32) {
    let report = match *command {
        Command::Exit { code } => return (status(code), code),
        Command::StopExit { code } => {
            if let Err(err) = send::to_self(Number::STOP) {
                return (failure(err.errno(), "stop_failed"), 1);
            }
            return (status(code), code);
        }
        Command::VerifyParent { ppid } => {
            let actual = ProcessId::parent();
            if actual.raw() == ppid {
                status(0)
            } else {
                let details = [("expected", ppid), ("actual", actual.raw())];
                mismatch("ppid_mismatch", details)
            }
        }
        Command::CreateSession => match session::create() {
            Ok(_) => status(0),
            Err(err) => failure(err.errno(), "setsid_failed"),
        },
        Command::DoubleSetsid => match session::create() {
            Err(err) => failure(err.errno(), "first_setsid_failed"),
            Ok(_) => match session::create() {
                Err(err) if err.semantic() == Some(Semantic::NoPermission) => status(0),
                Err(err) => failure(err.errno(), "second_setsid_should_fail_eperm"),
                Ok(_) => failure(Errno::from_raw(0), "second_setsid_should_fail_eperm"),
            },
        },
        Command::BecomeGroupLeader => match group::set(Process::Current, Target::Same) {
            Err(err) => failure(err.errno(), "setpgid_failed"),
            Ok(()) => leader_check(Process::Current, "not_group_leader"),
        },
        Command::SetpgidExplicit => {
            let me = Process::Id(ProcessId::current());
            match group::set(me, Target::Same) {
                Err(err) => failure(err.errno(), "setpgid_explicit_failed"),
                Ok(()) => leader_check(me, "pgid_not_set"),
            }
        }
        Command::ForkExit { code } => fork_exit(code),
    };
    let code = i32::from(!report.is_ok());
    (report, code)
}

fn leader_check(process: Process, msg: &str) -> Report {
    let pid = ProcessId::current().raw();
    match group::id(process) {
        Ok(pgid) if pgid.raw() == pid => status(0),
        Ok(pgid) => mismatch(msg, [("pid", pid), ("pgid", pgid.raw())]),
        Err(err) => failure(err.errno(), "getpgid_failed"),
    }
}

#[allow(unsafe_code)]
fn fork_exit(code: i32) -> Report {
    // SAFETY: the child calls only `_exit`.
    match unsafe { process::fork() } {
        Err(err) => failure(err.errno(), "fork_failed"),
        Ok(ForkOutcome::Child) => process::exit_immediately(code),
        Ok(ForkOutcome::Parent(child)) => match wait::child(child) {
            Ok(status) => Report::Forked {
                pid: ProcessId::current().raw(),
                child: child.raw(),
                child_exit: status.exit_code().unwrap_or(-1),
            },
            Err(err) => failure(err.errno(), "waitpid_failed"),
        },
    }
}

fn print(report: &Report) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    match config::output_format() {
        OutputFormat::Text => writeln!(out, "{report}")?,
        OutputFormat::Json => {
            let line = serde_json::to_string(report).map_err(std::io::Error::other)?;
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}

fn record(command: &Command, report: &Report, code: i32, started: Instant) -> std::io::Result<()> {
    let Some(path) = config::log_path() else {
        return Ok(());
    };
    let pid = ProcessId::current().raw();
    let mut emitter = LogEmitter::append_to_file(&path, "posix-test-helper", &pid.to_string())?;
    let (level, outcome) = if report.is_ok() {
        (LogLevel::Info, Outcome::Pass)
    } else {
        (LogLevel::Error, Outcome::Fail)
    };
    let elapsed = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    let context = serde_json::json!({
        "argv": std::env::args().collect::<Vec<_>>(),
        "ppid": ProcessId::parent().raw(),
    });
    let entry = LogEntry::new("", level, "helper_run")
        .with_command(command.name())
        .with_pid(pid)
        .with_outcome(outcome)
        .with_exit_code(code)
        .with_duration_us(elapsed)
        .with_report(report.clone())
        .with_details(context);
    emitter.emit_entry(entry)?;
    emitter.flush()
}

fn main() -> ExitCode {
    let started = Instant::now();
    let cli = Cli::parse();
    let (report, code) = run(&cli.command);

    if let Err(err) = print(&report) {
        eprintln!("posix-test-helper: cannot write report: {err}");
    }
    if let Err(err) = record(&cli.command, &report, code, started) {
        eprintln!("posix-test-helper: cannot write log: {err}");
    }
    // Exit statuses carry the low eight bits, as the shell would.
    ExitCode::from((code & 0xff) as u8)
}
