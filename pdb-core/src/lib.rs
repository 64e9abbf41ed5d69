#![forbid(unsafe_code)]

//! Shared building blocks for the PuppetDB terminus: the wire timestamp
//! codec, an injectable clock, configuration and the common error type.

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod wire_time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Target, TerminusConfig};
pub use error::{Error, Result};
pub use wire_time::FormatError;
