//! Management API client: pipeline assembly, the request executor, and thin resource managers.

pub mod connection;
pub mod log_stream;
pub mod options;
pub mod request;

pub use connection::*;
pub use log_stream::*;
pub use options::*;

// self
#[cfg(feature = "reqwest")] use crate::transport::ReqwestTransport;
use crate::{
	_prelude::*,
	auth::{ClientCredentials, ExchangeMetrics, StaticToken, TokenSource},
	config::{Credentials, ManagementConfig},
	error::ConfigError,
	middleware::{Bearer, ClientInfo, Diagnostics, Identify, Pipeline, RateLimitRetry},
	transport::Transport,
};

/// Handle to one tenant's management API.
///
/// Cloning is cheap; clones share the transport and the cached credential.
#[derive(Clone, Debug)]
pub struct Management {
	base_url: Url,
	timeout: std::time::Duration,
	pipeline: Pipeline,
	exchange: Option<Arc<ClientCredentials>>,
}
impl Management {
	/// Builds a client over a default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn new(config: ManagementConfig) -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::from)?;

		Self::with_transport(config, Arc::new(ReqwestTransport::with_client(client)))
	}

	/// Builds a client over a caller-supplied base transport.
	///
	/// The transport is shared by management calls and the client-credentials exchange. Layers
	/// are assembled outermost first: diagnostics (when `debug` is set), rate-limit retry (unless
	/// disabled), identification, then bearer attachment.
	pub fn with_transport(config: ManagementConfig, base: Arc<dyn Transport>) -> Result<Self> {
		let identify = Arc::new(Identify::new(&ClientInfo::default(), config.user_agent.as_deref())?);
		let (source, exchange) = match &config.credentials {
			Credentials::ClientCredentials { client_id, client_secret } => {
				let sender = Pipeline::new(base.clone()).shared_layer(identify.clone());
				let exchange = Arc::new(
					ClientCredentials::new(
						config.token_url.clone(),
						client_id.clone(),
						client_secret.expose(),
						config.audience.clone(),
						Arc::new(sender),
					)
					.with_leeway(config.expiry_leeway),
				);

				(exchange.clone() as Arc<dyn TokenSource>, Some(exchange))
			},
			Credentials::StaticToken(token) =>
				(Arc::new(StaticToken::new(token.expose())) as Arc<dyn TokenSource>, None),
		};
		let mut pipeline = Pipeline::new(base);

		if config.debug {
			pipeline = pipeline.layer(Diagnostics::default());
		}
		if config.retry_rate_limits {
			pipeline = pipeline.layer(RateLimitRetry::new(config.rate_limit_fallback));
		}

		let pipeline = pipeline.shared_layer(identify).layer(Bearer::new(source));

		Ok(Self { base_url: config.base_url, timeout: config.timeout, pipeline, exchange })
	}

	/// Resolves path segments against the management base URL, percent-encoding each one.
	pub fn uri(&self, segments: &[&str]) -> Result<Url> {
		let mut resolved = self.base_url.clone();

		resolved
			.path_segments_mut()
			.map_err(|_| ConfigError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
			.pop_if_empty()
			.extend(segments);

		Ok(resolved)
	}

	/// Returns the default per-call deadline.
	pub fn timeout(&self) -> std::time::Duration {
		self.timeout
	}

	/// Returns the token exchange counters when client credentials are in use.
	pub fn exchange_metrics(&self) -> Option<Arc<ExchangeMetrics>> {
		self.exchange.as_ref().map(|exchange| exchange.metrics())
	}

	/// Connection endpoints.
	pub fn connections(&self) -> ConnectionManager<'_> {
		ConnectionManager::new(self)
	}

	/// Log stream endpoints.
	pub fn log_streams(&self) -> LogStreamManager<'_> {
		LogStreamManager::new(self)
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	fn management() -> Management {
		let config = ManagementConfig::builder("tenant.example.com")
			.static_token("token")
			.build()
			.expect("Configuration should build.");

		Management::new(config).expect("Client should build.")
	}

	#[test]
	fn uri_appends_encoded_segments() {
		let management = management();
		let url = management.uri(&["connections", "con/1"]).expect("URI should resolve.");

		assert_eq!(url.as_str(), "https://tenant.example.com/api/v2/connections/con%2F1");
		assert!(management.exchange_metrics().is_none());
	}

	#[test]
	fn pipeline_layers_follow_configuration() {
		let base = || -> Arc<dyn Transport> { Arc::new(ReqwestTransport::default()) };
		let config = |debug, retry| {
			ManagementConfig::builder("tenant.example.com")
				.client_credentials("id", "secret")
				.debug(debug)
				.retry_rate_limits(retry)
				.build()
				.expect("Configuration should build.")
		};
		let full = Management::with_transport(config(true, true), base()).expect("Should build.");
		let bare = Management::with_transport(config(false, false), base()).expect("Should build.");

		assert_eq!(full.pipeline.len(), 4);
		assert_eq!(bare.pipeline.len(), 2);
		assert!(full.exchange_metrics().is_some());
	}

	#[tokio::test]
	async fn managers_share_one_exchanged_credential() {
		// crates.io
		use httpmock::prelude::*;
		// self
		use crate::_preludet::{TEST_CLIENT_ID, TEST_CLIENT_SECRET, build_test_management};

		let server = MockServer::start_async().await;
		let token = server
			.mock_async(|when, then| {
				when.method(POST).path("/oauth/token").json_body(serde_json::json!({
					"audience": format!("https://{}/api/v2/", server.address()),
					"client_id": TEST_CLIENT_ID,
					"client_secret": TEST_CLIENT_SECRET,
					"grant_type": "client_credentials",
				}));
				then.status(200)
					.header("content-type", "application/json")
					.body(r#"{"access_token":"shared","token_type":"Bearer","expires_in":86400}"#);
			})
			.await;
		let connections = server
			.mock_async(|when, then| {
				when.method(GET).path("/api/v2/connections").header("authorization", "Bearer shared");
				then.status(200).header("content-type", "application/json").body("[]");
			})
			.await;
		let streams = server
			.mock_async(|when, then| {
				when.method(GET).path("/api/v2/log-streams").header("authorization", "Bearer shared");
				then.status(200).header("content-type", "application/json").body("[]");
			})
			.await;
		let management = build_test_management(server.address());
		let options = RequestOptions::new();

		management.connections().list(&options).await.expect("Connections should list.");
		management.log_streams().list(&options).await.expect("Log streams should list.");

		token.assert_calls_async(1).await;
		connections.assert_async().await;
		streams.assert_async().await;
	}
}
