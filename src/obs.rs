//! Optional observability helpers for management calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `auth0_management.call` with the `kind`
//!   and `stage` fields, plus debug/warn events for token exchanges, rate-limit waits, and
//!   diagnostics dumps.
//! - Enable `metrics` to increment `auth0_management_call_total` for every
//!   attempt/success/failure (labeled by `kind` + `outcome`) and
//!   `auth0_management_rate_limited_total` for every 429 backoff.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Management API request issued through the executor.
	Request,
	/// Client-credentials exchange against the token endpoint.
	TokenExchange,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Request => "request",
			CallKind::TokenExchange => "token_exchange",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a call.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
