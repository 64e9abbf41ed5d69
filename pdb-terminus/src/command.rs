use serde::Serialize;

/// Name of a PuppetDB command as it appears in the command envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommandName(&'static str);

pub const DEACTIVATE_NODE: CommandName = CommandName("deactivate node");
pub const DEACTIVATE_NODE_VERSION: u32 = 3;

impl CommandName {
	pub const fn new(name: &'static str) -> Self { Self(name) }

	pub const fn as_str(&self) -> &'static str { self.0 }

	/// Form used in the `command` query parameter (`deactivate_node`).
	pub fn query_name(&self) -> String { self.0.replace(' ', "_") }
}

impl std::fmt::Display for CommandName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.0) }
}
