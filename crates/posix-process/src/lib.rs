//! # posix-process
//!
//! Typed process control and signal handling for POSIX systems.
//!
//! The raw calls overload their arguments and results with sentinels
//! (`0` for "self", `-1` for "any", a negated id for "group") and pack
//! several facts into one status integer. This crate replaces those
//! conventions with closed types from [`posix_process_core`] and reports
//! every failure as a typed error carrying the platform code.
//!
//! Nothing is retried internally. In particular `EINTR` always reaches the
//! caller.
//!
//! Signal dispositions are process-wide and unsynchronized, exactly as in
//! the kernel; signal masks are per thread.

#![cfg(unix)]
#![deny(unsafe_code)]

pub mod process;
pub mod signal;
#[allow(unsafe_code)]
mod sys;

pub use posix_process_core::errno::{Errno, Semantic};
