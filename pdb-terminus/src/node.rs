use crate::{
	client::{CommandClient, SubmissionResult},
	command::{DEACTIVATE_NODE, DEACTIVATE_NODE_VERSION},
	envelope::Envelope,
	error::{CommandError, Result},
	notifier::TracingNotifier,
	transport::UreqPool,
};
use pdb_core::{Clock, SystemClock, TerminusConfig};
use std::sync::Arc;
use tracing::info;

/// Node terminus `destroy`: tells PuppetDB a node is gone.
pub struct NodeDeactivator {
	client: CommandClient,
	clock: Arc<dyn Clock>,
}

impl NodeDeactivator {
	pub fn new(client: CommandClient, clock: Arc<dyn Clock>) -> Self { Self { client, clock } }

	/// Production wiring: `ureq` pool, tracing notifier, system clock.
	///
	/// Logging is left to the embedding process; see [`TerminusConfig::init_logging`].
	pub fn from_config(cfg: &TerminusConfig) -> Result<Self> {
		let target = cfg.target()?;
		if !UreqPool::supports(&target) {
			return Err(pdb_core::Error::config(format!("{target}: https requires the `tls` feature")).into());
		}
		let client = CommandClient::from_config(cfg, Arc::new(UreqPool::default()), Arc::new(TracingNotifier::new()))?;
		Ok(Self::new(client, Arc::new(SystemClock)))
	}

	pub fn client(&self) -> &CommandClient { &self.client }

	pub fn deactivate(&self, certname: &str) -> Result<SubmissionResult> {
		if certname.trim().is_empty() {
			return Err(CommandError::validation("certname must not be empty"));
		}
		let envelope = Envelope::build(DEACTIVATE_NODE, DEACTIVATE_NODE_VERSION, certname, self.clock.now());
		let result = self.client.submit(&envelope)?;
		info!(certname, uuid = %result.uuid, "node deactivated");
		Ok(result)
	}

	/// Runs [`deactivate`](Self::deactivate) on the blocking pool so async callers don't stall.
	pub async fn deactivate_async(self: Arc<Self>, certname: String) -> Result<SubmissionResult> {
		tokio::task::spawn_blocking(move || self.deactivate(&certname))
			.await
			.map_err(|e| CommandError::Aborted(e.to_string()))?
	}
}
