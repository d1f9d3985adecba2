// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by management calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("auth0_management.call", kind = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event once a token exchange produced a fresh credential.
pub fn trace_token_refreshed(expires_at: OffsetDateTime) {
	#[cfg(feature = "tracing")]
	tracing::debug!(%expires_at, "Obtained a fresh management API credential.");
	#[cfg(not(feature = "tracing"))]
	let _ = expires_at;
}

/// Emits a warning before a rate-limited request is suspended.
pub fn trace_rate_limited(url: &Url, wait: Duration) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%url, wait_ms = wait_millis(wait), "Rate limited; backing off.");
	#[cfg(not(feature = "tracing"))]
	let _ = (url, wait);
}

#[cfg(any(feature = "tracing", test))]
fn wait_millis(wait: Duration) -> u64 {
	u64::try_from(wait.whole_milliseconds()).unwrap_or(u64::MAX)
}

/// Emits a request/response dump produced by the diagnostics middleware.
pub fn trace_exchange_dump(dump: &str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(target: "auth0_management::diagnostics", "{dump}");
	#[cfg(not(feature = "tracing"))]
	let _ = dump;
}

/// Emits a warning when a diagnostics sink failed; the call itself is unaffected.
pub fn trace_diagnostics_failure(error: &(dyn StdError + Send + Sync)) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%error, "Diagnostics sink failed to record an exchange.");
	#[cfg(not(feature = "tracing"))]
	let _ = error;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn trace_helpers_accept_inputs() {
		let url = Url::parse("https://tenant.example.com/api/v2/users")
			.expect("Failed to parse test URL.");

		trace_rate_limited(&url, Duration::seconds(2));
		trace_exchange_dump("GET /api/v2/users");
		trace_token_refreshed(OffsetDateTime::UNIX_EPOCH);
	}

	#[test]
	fn wait_millis_saturates_instead_of_truncating() {
		assert_eq!(wait_millis(Duration::milliseconds(2_500)), 2_500);
		assert_eq!(wait_millis(Duration::MAX), u64::MAX);
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Request, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
