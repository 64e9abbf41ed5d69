use std::{collections::HashSet, sync::Mutex};
use tracing::{debug, warn};

/// Response header PuppetDB uses to flag a deprecated API surface.
pub const DEPRECATION_HEADER: &str = "X-Deprecation";

/// Sink for deprecation notices reported by the server.
///
/// Called at most once per response, from the submitting thread; must not block.
pub trait DeprecationNotifier: Send + Sync {
	fn notify_deprecation(&self, message: &str);
}

const MAX_DEPRECATION_WARNINGS: usize = 100;

/// Logs each distinct deprecation once via `tracing`, up to a fixed number of messages.
#[derive(Debug, Default)]
pub struct TracingNotifier {
	seen: Mutex<HashSet<String>>,
}

impl TracingNotifier {
	pub fn new() -> Self { Self::default() }
}

impl DeprecationNotifier for TracingNotifier {
	fn notify_deprecation(&self, message: &str) {
		let fresh = {
			let mut seen = self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
			seen.len() < MAX_DEPRECATION_WARNINGS && seen.insert(message.to_owned())
		};
		if fresh {
			warn!(target: "pdb::deprecation", "Deprecation from PuppetDB: {message}");
		} else {
			debug!(target: "pdb::deprecation", "suppressed repeated deprecation: {message}");
		}
	}
}
