//! Process identity, wait selection, wait-status decoding and the process
//! error kinds.

pub mod error;
pub mod group;
pub mod id;
pub mod status;
pub mod wait;

pub use error::{Error, Kind};
pub use id::{GroupId, Process, ProcessId, SessionId};
pub use status::{Classification, Status};
pub use wait::{Options, Selector, StateChange};
