use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered at `level`, unless `RUST_LOG` says otherwise.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(level: &str) -> bool {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init().is_ok()
}

#[cfg(test)]
mod tests {
	#[test]
	fn init_is_idempotent() {
		let _ = super::init("debug");
		assert!(!super::init("info"));
	}
}
