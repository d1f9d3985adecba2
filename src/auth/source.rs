//! Token sources consulted right before a management request leaves the process.

mod client_credentials;
mod metrics;

pub use client_credentials::*;
pub use metrics::ExchangeMetrics;

// crates.io
use time::macros::datetime;
// self
use crate::{
	_prelude::*,
	auth::{Credential, TokenSecret},
};

/// Boxed future returned by [`TokenSource::token`].
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<Credential>> + 'a + Send>>;

/// Supplies the bearer credential for outgoing requests.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Returns a credential that is valid at the time of the call.
	fn token(&self) -> TokenFuture<'_>;
}

/// Token source that always hands out the same caller-provided token.
#[derive(Clone, Debug)]
pub struct StaticToken(Credential);
impl StaticToken {
	/// Wraps a pre-issued access token; it is treated as never expiring.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self(Credential {
			access_token: TokenSecret::new(access_token),
			token_type: "Bearer".into(),
			expires_at: datetime!(9999-12-31 23:59:59 UTC),
		})
	}
}
impl TokenSource for StaticToken {
	fn token(&self) -> TokenFuture<'_> {
		let credential = self.0.clone();

		Box::pin(async move { Ok(credential) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn static_token_is_returned_verbatim() {
		let source = StaticToken::new("static-token");
		let credential = source.token().await.expect("Static tokens should never fail.");

		assert_eq!(credential.access_token.expose(), "static-token");
		assert!(credential.is_valid_at(OffsetDateTime::now_utc()));
	}
}
