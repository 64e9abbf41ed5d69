#![forbid(unsafe_code)]

//! PuppetDB node terminus.
//!
//! - [`Envelope`]: a timestamped command (`deactivate node`, version 3)
//! - [`CommandClient`]: POSTs envelopes through a [`ConnectionPool`] and reads the ack
//! - [`DeprecationNotifier`]: receives `X-Deprecation` notices, success or not
//! - [`NodeDeactivator`]: validate, stamp, submit
//!
//! Submission is a single blocking request/response with no retries.

pub mod client;
pub mod command;
pub mod envelope;
pub mod error;
pub mod node;
pub mod notifier;
pub mod transport;

pub use client::{CommandClient, SubmissionResult};
pub use command::{CommandName, DEACTIVATE_NODE, DEACTIVATE_NODE_VERSION};
pub use envelope::Envelope;
pub use error::{CommandError, Result};
pub use node::NodeDeactivator;
pub use notifier::{DeprecationNotifier, TracingNotifier, DEPRECATION_HEADER};
pub use transport::{Connection, ConnectionPool, HttpResponse, PostRequest, TransportError, UreqPool};
