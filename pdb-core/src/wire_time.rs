//! Canonical timestamp encoding used on the PuppetDB command wire.
//!
//! Instants are written as RFC 3339 in UTC with exactly three fractional
//! digits, e.g. `2015-03-01T12:00:00.123Z`. Anything finer than a
//! millisecond is truncated, so `parse(&format(t)) == truncate(t)`.
//!
//! `parse` accepts any RFC 3339 timestamp (explicit offsets included) and
//! normalizes it to UTC at millisecond precision.

use chrono::{DateTime, FixedOffset, SecondsFormat, Timelike, Utc};
use thiserror::Error;

const NANOS_PER_MILLI: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid wire time {input:?}: {reason}")]
pub struct FormatError {
	input: String,
	reason: String,
}

impl FormatError {
	pub fn input(&self) -> &str { &self.input }
}

/// Drop everything below one millisecond.
pub fn truncate(t: &DateTime<Utc>) -> DateTime<Utc> {
	let nanos = t.nanosecond() / NANOS_PER_MILLI * NANOS_PER_MILLI;
	t.with_nanosecond(nanos).unwrap_or(*t)
}

pub fn format(t: &DateTime<Utc>) -> String {
	truncate(t).to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse(s: &str) -> Result<DateTime<Utc>, FormatError> {
	let parsed: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(s.trim()).map_err(|e| FormatError {
		input: s.to_owned(),
		reason: e.to_string(),
	})?;
	Ok(truncate(&parsed.with_timezone(&Utc)))
}
