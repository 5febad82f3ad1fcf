//! Scenario tooling for posix-process.
//!
//! This crate provides:
//! - `posix-test-helper`: a small binary that performs one process-control
//!   scenario (session, group, stop, fork) and reports what it observed
//! - [`protocol`]: the helper's one-line report format, parsed and rendered
//! - [`structured_log`]: JSONL records of helper runs
//! - [`config`]: environment-driven output settings

#![deny(unsafe_code)]

pub mod config;
pub mod protocol;
pub mod structured_log;

pub use config::OutputFormat;
pub use protocol::{ProtocolError, Report};
