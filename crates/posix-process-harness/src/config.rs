//! Helper output configuration.
//!
//! - `POSIX_HELPER_FORMAT`: `text` (default) prints the `OK ...` / `ERR ...`
//!   line protocol; `json` prints the same report as one JSON object.
//! - `POSIX_HELPER_LOG`: when set, each run appends one JSONL record to this
//!   path.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};

pub const FORMAT_VAR: &str = "POSIX_HELPER_FORMAT";
pub const LOG_VAR: &str = "POSIX_HELPER_LOG";

/// How the helper prints its report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parse from string (case-insensitive). Unknown values are `Text`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "jsonl" => Self::Json,
            _ => Self::Text,
        }
    }
}

// 0=unresolved, 1=Text, 2=Json.
static CACHED_FORMAT: AtomicU8 = AtomicU8::new(0);

const FORMAT_UNRESOLVED: u8 = 0;
const FORMAT_TEXT: u8 = 1;
const FORMAT_JSON: u8 = 2;

fn format_to_u8(format: OutputFormat) -> u8 {
    match format {
        OutputFormat::Text => FORMAT_TEXT,
        OutputFormat::Json => FORMAT_JSON,
    }
}

fn u8_to_format(v: u8) -> OutputFormat {
    match v {
        FORMAT_JSON => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}

/// The configured output format (reads the environment once, cached
/// thereafter).
#[must_use]
pub fn output_format() -> OutputFormat {
    let cached = CACHED_FORMAT.load(Ordering::Relaxed);
    if cached != FORMAT_UNRESOLVED {
        return u8_to_format(cached);
    }
    let format = std::env::var(FORMAT_VAR)
        .map(|v| OutputFormat::from_str_loose(&v))
        .unwrap_or_default();
    CACHED_FORMAT.store(format_to_u8(format), Ordering::Release);
    format
}

/// Destination for structured run records, if any.
#[must_use]
pub fn log_path() -> Option<PathBuf> {
    std::env::var_os(LOG_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
