//! Submission of command envelopes to the PuppetDB command endpoint.

use crate::{
	envelope::Envelope,
	error::{CommandError, Result},
	notifier::{DeprecationNotifier, DEPRECATION_HEADER},
	transport::{ConnectionPool, HttpResponse, PostRequest, TransportError},
};
use pdb_core::{Target, TerminusConfig};
use serde::Deserialize;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

pub use pdb_core::config::DEFAULT_COMMAND_PATH;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(pdb_core::config::DEFAULT_TIMEOUT_SECS);

/// What PuppetDB hands back for an accepted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
	pub uuid: String,
	pub deprecation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommandAck {
	uuid: String,
}

pub struct CommandClient {
	pool: Arc<dyn ConnectionPool>,
	notifier: Arc<dyn DeprecationNotifier>,
	target: Target,
	command_path: String,
	timeout: Option<Duration>,
}

impl CommandClient {
	pub fn new(pool: Arc<dyn ConnectionPool>, notifier: Arc<dyn DeprecationNotifier>, target: Target) -> Self {
		Self { pool, notifier, target, command_path: DEFAULT_COMMAND_PATH.into(), timeout: Some(DEFAULT_TIMEOUT) }
	}

	pub fn from_config(cfg: &TerminusConfig, pool: Arc<dyn ConnectionPool>, notifier: Arc<dyn DeprecationNotifier>) -> Result<Self> {
		cfg.validate()?;
		Ok(Self::new(pool, notifier, cfg.target()?).with_command_path(cfg.command_path.clone()).with_timeout(cfg.timeout()))
	}

	pub fn with_command_path(mut self, path: impl Into<String>) -> Self {
		self.command_path = path.into();
		self
	}

	/// `None` waits as long as the server takes.
	pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn target(&self) -> &Target { &self.target }
	pub fn timeout(&self) -> Option<Duration> { self.timeout }

	pub fn submit(&self, envelope: &Envelope) -> Result<SubmissionResult> {
		self.submit_with_timeout(envelope, self.timeout)
	}

	/// POST `envelope` once. No retries.
	pub fn submit_with_timeout(&self, envelope: &Envelope, timeout: Option<Duration>) -> Result<SubmissionResult> {
		let body = envelope.to_json()?;
		let command = envelope.command().query_name();
		let version = envelope.version().to_string();
		let query = [
			("command", command.as_str()),
			("version", version.as_str()),
			("certname", envelope.certname()),
			("producer-timestamp", envelope.producer_timestamp()),
		];
		let headers = [("Content-Type", "application/json"), ("Accept", "application/json")];
		let request = PostRequest { path: &self.command_path, query: &query, headers: &headers, body: &body, timeout };

		debug!(command = %envelope.command(), certname = envelope.certname(), target = %self.target, "submitting command");
		let response = self
			.pool
			.connection(&self.target)
			.and_then(|conn| conn.post(&request))
			.map_err(|e| self.transport_error(e))?;

		let deprecation = response.header(DEPRECATION_HEADER).map(str::to_owned);
		if let Some(message) = &deprecation {
			self.notifier.notify_deprecation(message);
		}
		let result = acknowledge(response, deprecation)?;
		info!(command = %envelope.command(), certname = envelope.certname(), uuid = %result.uuid, "command accepted");
		Ok(result)
	}

	fn transport_error(&self, e: TransportError) -> CommandError {
		let target = self.target.to_string();
		match e {
			TransportError::Timeout => CommandError::Timeout { target },
			TransportError::Connect(message) => CommandError::Connection { target, message },
		}
	}
}

fn acknowledge(response: HttpResponse, deprecation: Option<String>) -> Result<SubmissionResult> {
	let success = response.is_success();
	let HttpResponse { status, reason, body, .. } = response;
	if !success {
		return Err(CommandError::Submission { status, reason, body, deprecation });
	}
	match serde_json::from_str::<CommandAck>(&body) {
		Ok(ack) if !ack.uuid.trim().is_empty() => Ok(SubmissionResult { uuid: ack.uuid, deprecation }),
		Ok(_) => Err(CommandError::ResponseFormat { reason: "empty uuid".into(), body, deprecation }),
		Err(e) => Err(CommandError::ResponseFormat { reason: e.to_string(), body, deprecation }),
	}
}
