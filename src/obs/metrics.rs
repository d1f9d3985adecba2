// self
use crate::obs::{CallKind, CallOutcome};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"auth0_management_call_total",
			"kind" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records one 429 backoff via the global metrics recorder (when enabled).
pub fn record_rate_limited() {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("auth0_management_rate_limited_total").increment(1);
	}
}
