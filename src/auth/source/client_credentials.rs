//! Client-credentials token source with caching + singleflight refresh.
//!
//! [`ClientCredentials`] keeps the most recent [`Credential`] and hands it out until it
//! expires. Once it is missing or expired, callers queue on a single refresh guard; the first
//! one performs the exchange and everybody who was waiting receives that result instead of
//! starting another exchange. A failure reaches the waiters as one shared [`Error::Exchange`];
//! it never replaces the cached credential, so the next call starts over from scratch.

// self
use crate::{
	_prelude::*,
	auth::{Credential, ExchangeMetrics, TokenFuture, TokenSecret, TokenSource},
	error::{ApiError, ConfigError, DecodeError},
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::{ApiRequest, Transport},
};

const GRANT_TYPE: &str = "client_credentials";

/// Token source performing the OAuth 2.0 client-credentials grant with a JSON body.
pub struct ClientCredentials {
	token_url: Url,
	client_id: String,
	client_secret: TokenSecret,
	audience: String,
	sender: Arc<dyn Transport>,
	leeway: Duration,
	cache: RwLock<CachedCredential>,
	refresh_guard: AsyncMutex<()>,
	metrics: Arc<ExchangeMetrics>,
}
impl ClientCredentials {
	/// Creates a source that exchanges credentials at `token_url` through `sender`.
	pub fn new(
		token_url: Url,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		audience: impl Into<String>,
		sender: Arc<dyn Transport>,
	) -> Self {
		Self {
			token_url,
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			audience: audience.into(),
			sender,
			leeway: Duration::ZERO,
			cache: Default::default(),
			refresh_guard: AsyncMutex::new(()),
			metrics: Default::default(),
		}
	}

	/// Treats cached credentials as expired `leeway` before their real expiry.
	pub fn with_leeway(mut self, leeway: Duration) -> Self {
		self.leeway = if leeway.is_negative() { Duration::ZERO } else { leeway };

		self
	}

	/// Returns the shared exchange counters.
	pub fn metrics(&self) -> Arc<ExchangeMetrics> {
		self.metrics.clone()
	}

	/// Returns the cached credential without triggering an exchange.
	pub fn cached(&self) -> Option<Credential> {
		self.cache.read().credential.clone()
	}

	/// Returns a valid credential, exchanging client credentials when the cache is stale.
	pub async fn credential(&self) -> Result<Credential> {
		let observed = {
			let cache = self.cache.read();

			if let Some(current) = cache.usable(OffsetDateTime::now_utc(), self.leeway) {
				return Ok(current);
			}

			cache.generation
		};
		let _singleflight = self.refresh_guard.lock().await;

		{
			let cache = self.cache.read();

			// Another caller finished an exchange while this one was queued.
			if cache.generation != observed {
				if let Some(failure) = &cache.failure {
					self.metrics.record_coalesced();

					return Err(Error::Exchange(failure.clone()));
				}
				if let Some(current) = cache.credential.clone() {
					self.metrics.record_coalesced();

					return Ok(current);
				}
			}
		}

		let outcome = self.exchange().await;
		let mut cache = self.cache.write();

		cache.generation = cache.generation.wrapping_add(1);

		match outcome {
			Ok(fresh) => {
				cache.credential = Some(fresh.clone());
				cache.failure = None;

				Ok(fresh)
			},
			Err(e) => {
				let failure = Arc::new(e);

				cache.failure = Some(failure.clone());

				Err(Error::Exchange(failure))
			},
		}
	}

	async fn exchange(&self) -> Result<Credential> {
		const KIND: CallKind = CallKind::TokenExchange;

		let span = CallSpan::new(KIND, "client_credentials");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record_attempt();

		let result = span.instrument(self.exchange_once()).await;

		match &result {
			Ok(credential) => {
				self.metrics.record_success();
				obs::record_call_outcome(KIND, CallOutcome::Success);
				obs::trace_token_refreshed(credential.expires_at);
			},
			Err(_) => {
				self.metrics.record_failure();
				obs::record_call_outcome(KIND, CallOutcome::Failure);
			},
		}

		result
	}

	async fn exchange_once(&self) -> Result<Credential> {
		let body = serde_json::to_vec(&TokenRequest {
			audience: &self.audience,
			client_id: &self.client_id,
			client_secret: self.client_secret.expose(),
			grant_type: GRANT_TYPE,
		})
		.map_err(|source| DecodeError::Request { source })?;
		let request = ApiRequest::new(Method::POST, self.token_url.clone()).with_json_body(body);
		let response = self.sender.send(request).await?;

		if !response.is_success() {
			return Err(ApiError::from_response(response.status, &response.body).into());
		}

		let issued_at = OffsetDateTime::now_utc();
		let mut de = serde_json::Deserializer::from_slice(&response.body);
		let parsed: TokenResponse = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| DecodeError::Response { source, status: response.status.as_u16() })?;

		if parsed.expires_in <= 0 {
			return Err(ConfigError::NonPositiveExpiresIn.into());
		}

		Ok(Credential::issued(
			parsed.access_token,
			parsed.token_type,
			issued_at,
			Duration::seconds(parsed.expires_in),
		))
	}
}
impl TokenSource for ClientCredentials {
	fn token(&self) -> TokenFuture<'_> {
		Box::pin(self.credential())
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("token_url", &self.token_url.as_str())
			.field("client_id", &self.client_id)
			.field("audience", &self.audience)
			.field("leeway", &self.leeway)
			.finish()
	}
}

#[derive(Debug, Default)]
struct CachedCredential {
	credential: Option<Credential>,
	// Outcome of the latest exchange when it failed; only read by callers queued behind it.
	failure: Option<Arc<Error>>,
	generation: u64,
}
impl CachedCredential {
	fn usable(&self, now: OffsetDateTime, leeway: Duration) -> Option<Credential> {
		self.credential.as_ref().filter(|current| current.is_valid_with_leeway(now, leeway)).cloned()
	}
}

#[derive(Serialize)]
struct TokenRequest<'a> {
	audience: &'a str,
	client_id: &'a str,
	client_secret: &'a str,
	grant_type: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
	#[serde(default = "default_token_type")]
	token_type: String,
	expires_in: i64,
	#[allow(dead_code)]
	#[serde(default)]
	scope: Option<String>,
}

fn default_token_type() -> String {
	"Bearer".into()
}
