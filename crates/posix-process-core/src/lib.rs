//! # posix-process-core
//!
//! Pure typed model of the POSIX process-control surface.
//!
//! Everything in this crate is a value: identifiers, wait selectors and
//! options, wait-status decoding, signal numbers, signal-action flags and
//! the error taxonomy. The only calls made from here read the calling
//! thread's error number and the process's own ids. The rest live in
//! the `posix-process` crate, which re-exports these types.

#![deny(unsafe_code)]

pub mod errno;
pub mod process;
pub mod signal;

pub use errno::{Errno, Semantic};
