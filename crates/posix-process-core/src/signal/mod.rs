//! Signal identity, mask-change modes, action flags and handlers, and the
//! signal error kinds.

pub mod action;
pub mod error;
pub mod mask;
pub mod number;

pub use action::{Flags, Handler, InfoHandler, SimpleHandler};
pub use error::{Error, Kind};
pub use mask::How;
pub use number::Number;
