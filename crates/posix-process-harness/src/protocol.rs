//! The helper's report line.
//!
//! Text form, one line per run:
//!
//! ```text
//! OK pid=123 ppid=456 pgid=123 sid=123 exit=0
//! OK pid=123 child=124 child_exit=7
//! ERR errno=1 msg=setsid_failed
//! ERR errno=0 msg=ppid_mismatch expected=10 actual=11
//! ```
//!
//! The JSON form carries the same fields with a `report` tag.

use std::fmt;

use posix_process::process::{GroupId, ProcessId, SessionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("empty report line")]
    Empty,
    #[error("unknown report tag '{0}'")]
    UnknownTag(String),
    #[error("malformed field '{0}' (expected key=value)")]
    MalformedField(String),
    #[error("required field '{0}' missing")]
    MissingField(&'static str),
    #[error("field '{field}' is not an integer: '{value}'")]
    NotAnInteger { field: &'static str, value: String },
    #[error("invalid JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

/// One helper run's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    /// The helper's identity and memberships at the end of the run.
    Status {
        pid: i32,
        ppid: i32,
        pgid: i32,
        sid: i32,
        exit: i32,
    },
    /// `fork-exit`: the helper forked `child` and collected it.
    Forked {
        pid: i32,
        child: i32,
        child_exit: i32,
    },
    /// A call failed or a check did not hold. `errno` is 0 for checks.
    Failure {
        errno: i32,
        msg: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        details: Vec<(String, String)>,
    },
}

impl Report {
    /// Parses either form; a line starting with `{` is JSON.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim();
        if line.starts_with('{') {
            return Ok(serde_json::from_str(line)?);
        }

        let mut tokens = line.split_whitespace();
        let tag = tokens.next().ok_or(ProtocolError::Empty)?;
        let fields = tokens
            .map(|token| {
                token
                    .split_once('=')
                    .ok_or_else(|| ProtocolError::MalformedField(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match tag {
            "OK" if lookup(&fields, "child").is_some() => Ok(Self::Forked {
                pid: integer(&fields, "pid")?,
                child: integer(&fields, "child")?,
                child_exit: integer(&fields, "child_exit")?,
            }),
            "OK" => Ok(Self::Status {
                pid: integer(&fields, "pid")?,
                ppid: integer(&fields, "ppid")?,
                pgid: integer(&fields, "pgid")?,
                sid: integer(&fields, "sid")?,
                exit: integer(&fields, "exit")?,
            }),
            "ERR" => Ok(Self::Failure {
                errno: integer(&fields, "errno")?,
                msg: lookup(&fields, "msg")
                    .ok_or(ProtocolError::MissingField("msg"))?
                    .to_string(),
                details: fields
                    .iter()
                    .filter(|(key, _)| !matches!(*key, "errno" | "msg"))
                    .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                    .collect(),
            }),
            other => Err(ProtocolError::UnknownTag(other.to_string())),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }

    #[must_use]
    pub fn process(&self) -> Option<ProcessId> {
        match self {
            Self::Status { pid, .. } | Self::Forked { pid, .. } => Some(ProcessId::new(*pid)),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<ProcessId> {
        match self {
            Self::Status { ppid, .. } => Some(ProcessId::new(*ppid)),
            _ => None,
        }
    }

    #[must_use]
    pub fn group(&self) -> Option<GroupId> {
        match self {
            Self::Status { pgid, .. } => Some(GroupId::new(*pgid)),
            _ => None,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<SessionId> {
        match self {
            Self::Status { sid, .. } => Some(SessionId::new(*sid)),
            _ => None,
        }
    }
}

fn lookup<'a>(fields: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
}

fn integer(fields: &[(&str, &str)], name: &'static str) -> Result<i32, ProtocolError> {
    let value = lookup(fields, name).ok_or(ProtocolError::MissingField(name))?;
    value.parse().map_err(|_| ProtocolError::NotAnInteger {
        field: name,
        value: value.to_string(),
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status {
                pid,
                ppid,
                pgid,
                sid,
                exit,
            } => write!(
                f,
                "OK pid={pid} ppid={ppid} pgid={pgid} sid={sid} exit={exit}"
            ),
            Self::Forked {
                pid,
                child,
                child_exit,
            } => write!(f, "OK pid={pid} child={child} child_exit={child_exit}"),
            Self::Failure {
                errno,
                msg,
                details,
            } => {
                write!(f, "ERR errno={errno} msg={msg}")?;
                for (key, value) in details {
                    write!(f, " {key}={value}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_line() {
        let report = Report::parse("OK pid=123 ppid=456 pgid=123 sid=120 exit=3\n").unwrap();
        assert_eq!(
            report,
            Report::Status {
                pid: 123,
                ppid: 456,
                pgid: 123,
                sid: 120,
                exit: 3
            }
        );
        assert!(report.is_ok());
        assert_eq!(report.process(), Some(ProcessId::new(123)));
        assert_eq!(report.group(), Some(GroupId::new(123)));
        assert_eq!(report.session(), Some(SessionId::new(120)));
    }

    #[test]
    fn parses_fork_line() {
        let report = Report::parse("OK pid=10 child=11 child_exit=7").unwrap();
        assert_eq!(
            report,
            Report::Forked {
                pid: 10,
                child: 11,
                child_exit: 7
            }
        );
        assert_eq!(report.parent(), None);
    }

    #[test]
    fn failure_keeps_extra_fields_in_order() {
        let line = "ERR errno=0 msg=ppid_mismatch expected=10 actual=11";
        let report = Report::parse(line).unwrap();
        assert!(!report.is_ok());
        match &report {
            Report::Failure {
                errno,
                msg,
                details,
            } => {
                assert_eq!(*errno, 0);
                assert_eq!(msg, "ppid_mismatch");
                assert_eq!(
                    details,
                    &vec![
                        ("expected".to_string(), "10".to_string()),
                        ("actual".to_string(), "11".to_string())
                    ]
                );
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(report.to_string(), line);
    }

    #[test]
    fn json_form_is_accepted() {
        let report = Report::Status {
            pid: 1,
            ppid: 2,
            pgid: 3,
            sid: 4,
            exit: 5,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"report\":\"status\""));
        assert_eq!(Report::parse(&json).unwrap(), report);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(Report::parse("   "), Err(ProtocolError::Empty)));
        assert!(matches!(
            Report::parse("MAYBE pid=1"),
            Err(ProtocolError::UnknownTag(tag)) if tag == "MAYBE"
        ));
        assert!(matches!(
            Report::parse("OK pid"),
            Err(ProtocolError::MalformedField(_))
        ));
        assert!(matches!(
            Report::parse("OK pid=1 ppid=2 pgid=3 sid=4"),
            Err(ProtocolError::MissingField("exit"))
        ));
        assert!(matches!(
            Report::parse("ERR errno=x msg=m"),
            Err(ProtocolError::NotAnInteger { field: "errno", .. })
        ));
        assert!(matches!(Report::parse("{not json"), Err(ProtocolError::Json(_))));
    }
}
