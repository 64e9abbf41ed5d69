use thiserror::Error;

pub type Result<T, E = CommandError> = std::result::Result<T, E>;

/// Why a command did not produce an acknowledgment.
///
/// Variants that saw an HTTP response keep the deprecation notice it carried,
/// if any, so callers can still surface it.
#[derive(Debug, Error)]
pub enum CommandError {
	#[error("invalid command: {0}")]
	Validation(String),
	#[error("failed to connect to {target}: {message}")]
	Connection { target: String, message: String },
	#[error("request to {target} timed out")]
	Timeout { target: String },
	#[error("[{status} {reason}] {body}")]
	Submission { status: u16, reason: String, body: String, deprecation: Option<String> },
	#[error("malformed response from PuppetDB: {reason}")]
	ResponseFormat { reason: String, body: String, deprecation: Option<String> },
	#[error("failed to encode command: {0}")]
	Encode(#[from] serde_json::Error),
	#[error("submission task aborted: {0}")]
	Aborted(String),
	#[error(transparent)]
	Core(#[from] pdb_core::Error),
}

impl CommandError {
	pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

	/// HTTP status of a rejected submission.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Submission { status, .. } => Some(*status),
			_ => None,
		}
	}

	pub fn deprecation(&self) -> Option<&str> {
		match self {
			Self::Submission { deprecation, .. } | Self::ResponseFormat { deprecation, .. } => deprecation.as_deref(),
			_ => None,
		}
	}
}
