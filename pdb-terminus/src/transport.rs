//! Connection pool seam and its `ureq` implementation.
//!
//! The command client never opens or closes sockets itself. It asks a
//! [`ConnectionPool`] for a handle to a [`Target`], issues one POST through
//! it and drops the handle; keep-alive and reuse are the pool's business.

use pdb_core::Target;
use std::{io, time::Duration};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TransportError {
	#[error("timed out")]
	Timeout,
	#[error("{0}")]
	Connect(String),
}

/// One outbound POST.
#[derive(Debug, Clone, Copy)]
pub struct PostRequest<'a> {
	pub path: &'a str,
	pub query: &'a [(&'a str, &'a str)],
	pub headers: &'a [(&'a str, &'a str)],
	pub body: &'a str,
	pub timeout: Option<Duration>,
}

/// A fully read HTTP response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
	pub status: u16,
	pub reason: String,
	pub headers: Vec<(String, String)>,
	pub body: String,
}

impl HttpResponse {
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, reason: String::new(), headers: Vec::new(), body: body.into() }
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	/// Case-insensitive header lookup; first match wins.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
	}

	pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

pub trait Connection {
	fn post(&self, request: &PostRequest<'_>) -> Result<HttpResponse, TransportError>;
}

pub trait ConnectionPool: Send + Sync {
	fn connection(&self, target: &Target) -> Result<Box<dyn Connection + '_>, TransportError>;
}

/// Pool backed by a shared `ureq::Agent`, which keeps idle connections per host.
#[derive(Debug, Clone)]
pub struct UreqPool {
	agent: ureq::Agent,
}

impl UreqPool {
	pub fn new(connect_timeout: Duration, max_idle_per_host: usize) -> Self {
		let agent = ureq::AgentBuilder::new()
			.timeout_connect(connect_timeout)
			.max_idle_connections_per_host(max_idle_per_host)
			.redirects(0)
			.build();
		Self { agent }
	}
}

impl UreqPool {
	/// Whether this build can reach `target` at all.
	pub fn supports(target: &Target) -> bool { !target.tls || cfg!(feature = "tls") }
}

impl Default for UreqPool {
	fn default() -> Self { Self::new(Duration::from_secs(10), 4) }
}

impl ConnectionPool for UreqPool {
	fn connection(&self, target: &Target) -> Result<Box<dyn Connection + '_>, TransportError> {
		if !Self::supports(target) {
			return Err(TransportError::Connect(format!("{target}: https requires the `tls` feature")));
		}
		Ok(Box::new(UreqConnection { agent: &self.agent, base_url: target.base_url() }))
	}
}

struct UreqConnection<'a> {
	agent: &'a ureq::Agent,
	base_url: String,
}

impl Connection for UreqConnection<'_> {
	fn post(&self, request: &PostRequest<'_>) -> Result<HttpResponse, TransportError> {
		let url = format!("{}{}", self.base_url, request.path);
		let mut http_request = self.agent.post(&url);
		for (k, v) in request.query {
			http_request = http_request.query(k, v);
		}
		for (k, v) in request.headers {
			http_request = http_request.set(k, v);
		}
		if let Some(t) = request.timeout {
			http_request = http_request.timeout(t);
		}
		debug!(url = %url, "POST");
		match http_request.send_string(request.body) {
			Ok(resp) => read_response(resp),
			// Non-2xx still carries headers and a body worth reading.
			Err(ureq::Error::Status(_, resp)) => read_response(resp),
			Err(ureq::Error::Transport(t)) => Err(classify(&t)),
		}
	}
}

fn read_response(resp: ureq::Response) -> Result<HttpResponse, TransportError> {
	let status = resp.status();
	let reason = resp.status_text().to_owned();
	let headers = resp
		.headers_names()
		.into_iter()
		.filter_map(|name| resp.header(&name).map(|v| (name.clone(), v.to_owned())))
		.collect();
	let body = resp.into_string().map_err(|e| from_io(&e))?;
	Ok(HttpResponse { status, reason, headers, body })
}

fn is_timeout(e: &io::Error) -> bool {
	matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

fn from_io(e: &io::Error) -> TransportError {
	if is_timeout(e) { TransportError::Timeout } else { TransportError::Connect(e.to_string()) }
}

fn classify(t: &ureq::Transport) -> TransportError {
	let mut source = std::error::Error::source(t);
	while let Some(err) = source {
		if err.downcast_ref::<io::Error>().is_some_and(is_timeout) {
			return TransportError::Timeout;
		}
		source = err.source();
	}
	TransportError::Connect(t.to_string())
}
