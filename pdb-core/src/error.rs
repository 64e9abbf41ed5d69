use thiserror::Error;

use crate::wire_time::FormatError;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	#[error("toml parse error: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("toml encode error: {0}")]
	TomlEncode(#[from] toml::ser::Error),
	#[error("config: {0}")]
	Config(String),
	#[error(transparent)]
	Format(#[from] FormatError),
}

impl Error {
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }
}
