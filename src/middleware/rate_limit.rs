//! Rate-limit signals and the 429 retry layer.
//!
//! Backoff is negotiated per request: each in-flight call that receives `429 Too Many
//! Requests` sleeps until the advertised reset instant (or a fixed fallback window) and then
//! resends the identical request. No budget is shared between concurrent calls. The sleep is
//! an ordinary `.await`, so dropping the call (e.g., when its deadline elapses) aborts the loop.

// self
use crate::{
	_prelude::*,
	middleware::{Middleware, Next},
	obs,
	transport::{ApiRequest, ApiResponse, SendFuture},
};

/// Header carrying the request quota for the current window.
pub const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
/// Header carrying the remaining quota for the current window.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
/// Header carrying the Unix-epoch second at which the window resets.
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Quota metadata derived from a single response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitSignal {
	/// Requests allowed per window.
	pub limit: u64,
	/// Requests left in the current window.
	pub remaining: u64,
	/// Instant at which the window resets.
	pub reset_at: OffsetDateTime,
}
impl RateLimitSignal {
	/// Parses all three rate-limit headers; returns `None` if any is missing or malformed.
	pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
		Some(Self {
			limit: header_u64(headers, RATE_LIMIT_LIMIT)?,
			remaining: header_u64(headers, RATE_LIMIT_REMAINING)?,
			reset_at: reset_at(headers)?,
		})
	}

	/// Returns how long to wait, as observed at `now`, before the window resets.
	pub fn wait_at(&self, now: OffsetDateTime) -> Duration {
		clamp_wait(self.reset_at - now)
	}
}

/// Resends requests rejected with `429 Too Many Requests` after backing off.
#[derive(Clone, Debug)]
pub struct RateLimitRetry {
	fallback: Duration,
}
impl RateLimitRetry {
	/// Default wait applied when the reset header is absent or unparseable.
	pub const DEFAULT_FALLBACK: Duration = Duration::seconds(5);

	/// Creates a layer with the given fallback window.
	pub fn new(fallback: Duration) -> Self {
		Self { fallback: clamp_wait(fallback) }
	}

	/// Computes the backoff for a 429 response observed at `now`.
	///
	/// Only the reset header is consulted; a reset instant in the past yields a zero wait.
	pub fn backoff(&self, response: &ApiResponse, now: OffsetDateTime) -> Duration {
		match reset_at(&response.headers) {
			Some(instant) => clamp_wait(instant - now),
			None => self.fallback,
		}
	}
}
impl Default for RateLimitRetry {
	fn default() -> Self {
		Self::new(Self::DEFAULT_FALLBACK)
	}
}
impl Middleware for RateLimitRetry {
	fn handle<'a>(&'a self, request: ApiRequest, next: Next<'a>) -> SendFuture<'a> {
		Box::pin(async move {
			loop {
				let response = next.run(request.clone()).await?;

				if response.status != StatusCode::TOO_MANY_REQUESTS {
					return Ok(response);
				}

				let wait = self.backoff(&response, OffsetDateTime::now_utc());

				obs::record_rate_limited();
				obs::trace_rate_limited(&request.url, wait);

				tokio::time::sleep(std::time::Duration::try_from(wait).unwrap_or_default()).await;
			}
		})
	}
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
	headers.get(name)?.to_str().ok().map(str::trim)
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
	header_str(headers, name)?.parse().ok()
}

fn reset_at(headers: &HeaderMap) -> Option<OffsetDateTime> {
	let epoch = header_str(headers, RATE_LIMIT_RESET)?.parse::<i64>().ok()?;

	OffsetDateTime::from_unix_timestamp(epoch).ok()
}

fn clamp_wait(wait: Duration) -> Duration {
	if wait.is_negative() { Duration::ZERO } else { wait }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
		let mut map = HeaderMap::new();

		for &(name, value) in pairs {
			map.insert(
				HeaderName::from_static(name),
				HeaderValue::from_str(value).expect("Test header values are ASCII."),
			);
		}

		map
	}

	#[test]
	fn signal_requires_all_headers() {
		let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("Valid timestamp.");
		let signal = RateLimitSignal::from_headers(&headers(&[
			(RATE_LIMIT_LIMIT, "50"),
			(RATE_LIMIT_REMAINING, "0"),
			(RATE_LIMIT_RESET, "1700000003"),
		]))
		.expect("Complete headers should parse.");

		assert_eq!(signal.limit, 50);
		assert_eq!(signal.remaining, 0);
		assert_eq!(signal.wait_at(now), Duration::seconds(3));
		assert!(
			RateLimitSignal::from_headers(&headers(&[(RATE_LIMIT_RESET, "1700000003")])).is_none()
		);
	}

	#[test]
	fn backoff_uses_reset_header_or_fallback() {
		let layer = RateLimitRetry::default();
		let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("Valid timestamp.");
		let with_reset = ApiResponse::new(
			StatusCode::TOO_MANY_REQUESTS,
			headers(&[(RATE_LIMIT_RESET, "1700000002")]),
			Vec::new(),
		);
		let garbage = ApiResponse::new(
			StatusCode::TOO_MANY_REQUESTS,
			headers(&[(RATE_LIMIT_RESET, "soon")]),
			Vec::new(),
		);
		let missing = ApiResponse::new(StatusCode::TOO_MANY_REQUESTS, HeaderMap::new(), Vec::new());
		let past = ApiResponse::new(
			StatusCode::TOO_MANY_REQUESTS,
			headers(&[(RATE_LIMIT_RESET, "1699999990")]),
			Vec::new(),
		);

		assert_eq!(layer.backoff(&with_reset, now), Duration::seconds(2));
		assert_eq!(layer.backoff(&garbage, now), Duration::seconds(5));
		assert_eq!(layer.backoff(&missing, now), Duration::seconds(5));
		assert_eq!(layer.backoff(&past, now), Duration::ZERO);
	}
}
