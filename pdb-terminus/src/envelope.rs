use crate::command::CommandName;
use chrono::{DateTime, Utc};
use pdb_core::wire_time;
use serde::Serialize;

/// A single command ready to be serialized onto the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
	command: CommandName,
	version: u32,
	payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
	certname: String,
	producer_timestamp: String,
}

impl Envelope {
	/// Stamp a command for `certname` with `now` as its producer timestamp.
	///
	/// `certname` is taken as given; callers reject blank names first.
	pub fn build(command: CommandName, version: u32, certname: impl Into<String>, now: DateTime<Utc>) -> Self {
		Self {
			command,
			version,
			payload: Payload { certname: certname.into(), producer_timestamp: wire_time::format(&now) },
		}
	}

	pub fn command(&self) -> CommandName { self.command }
	pub fn version(&self) -> u32 { self.version }
	pub fn certname(&self) -> &str { &self.payload.certname }
	pub fn producer_timestamp(&self) -> &str { &self.payload.producer_timestamp }

	/// Decoded producer timestamp.
	pub fn produced_at(&self) -> pdb_core::Result<DateTime<Utc>> {
		Ok(wire_time::parse(&self.payload.producer_timestamp)?)
	}

	pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string(self) }
}
