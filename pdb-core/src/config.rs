use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "https://puppetdb:8081";
pub const DEFAULT_COMMAND_PATH: &str = "/pdb/cmd/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to a PuppetDB server, as read from `puppetdb.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TerminusConfig {
	pub server_url: String,
	pub command_path: String,
	/// Per-request timeout; `0` waits forever.
	pub timeout_secs: u64,
	pub log_level: String,
}

impl Default for TerminusConfig {
	fn default() -> Self {
		Self {
			server_url: DEFAULT_SERVER_URL.into(),
			command_path: DEFAULT_COMMAND_PATH.into(),
			timeout_secs: DEFAULT_TIMEOUT_SECS,
			log_level: "info".into(),
		}
	}
}

/// Where commands go: the key a connection pool hands out handles for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
	pub tls: bool,
	pub host: String,
	pub port: u16,
}

impl Target {
	pub fn new(tls: bool, host: impl Into<String>, port: u16) -> Self {
		Self { tls, host: host.into(), port }
	}

	pub fn base_url(&self) -> String {
		let scheme = if self.tls { "https" } else { "http" };
		format!("{scheme}://{}:{}", self.host, self.port)
	}
}

impl std::fmt::Display for Target {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.base_url()) }
}

impl TerminusConfig {
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let data = fs::read_to_string(path)?;
		Self::from_toml_str(&data)
	}

	pub fn from_toml_str(data: &str) -> Result<Self> {
		let cfg: Self = toml::from_str(data)?;
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		fs::write(path, toml::to_string_pretty(self)?)?;
		Ok(())
	}

	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Defaults overlaid with `PDB_*` variables resolved through `lookup`.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
		let mut cfg = Self::default();
		if let Some(v) = lookup("PDB_SERVER_URL") { cfg.server_url = v; }
		if let Some(v) = lookup("PDB_COMMAND_PATH") { cfg.command_path = v; }
		if let Some(v) = lookup("PDB_TIMEOUT_SECS") {
			cfg.timeout_secs = v.trim().parse().map_err(|_| Error::config(format!("invalid PDB_TIMEOUT_SECS: {v}")))?;
		}
		if let Some(v) = lookup("PDB_LOG_LEVEL") { cfg.log_level = v; }
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn validate(&self) -> Result<()> {
		let allowed = ["trace", "debug", "info", "warn", "error"];
		if !allowed.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		if !self.command_path.starts_with('/') {
			return Err(Error::config(format!("command_path must start with '/': {}", self.command_path)));
		}
		self.target().map(|_| ())
	}

	/// Install the fmt subscriber at `log_level`; see [`crate::logging::init`].
	pub fn init_logging(&self) -> bool { crate::logging::init(&self.log_level) }

	pub fn timeout(&self) -> Option<Duration> {
		(self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
	}

	pub fn target(&self) -> Result<Target> {
		let url = Url::parse(&self.server_url).map_err(|e| Error::config(format!("invalid server_url {}: {e}", self.server_url)))?;
		let tls = match url.scheme() {
			"https" => true,
			"http" => false,
			other => return Err(Error::config(format!("unsupported server_url scheme: {other}"))),
		};
		if !matches!(url.path(), "" | "/") {
			return Err(Error::config(format!("server_url cannot contain a path: {}", self.server_url)));
		}
		if url.query().is_some() || url.fragment().is_some() {
			return Err(Error::config(format!("server_url cannot contain a query or fragment: {}", self.server_url)));
		}
		if !url.username().is_empty() || url.password().is_some() {
			return Err(Error::config(format!("server_url cannot contain credentials: {}", self.server_url)));
		}
		let host = url.host_str().ok_or_else(|| Error::config(format!("server_url has no host: {}", self.server_url)))?;
		let port = url.port_or_known_default().unwrap_or(if tls { 443 } else { 80 });
		Ok(Target::new(tls, host, port))
	}
}
