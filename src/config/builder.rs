// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::{Credentials, ManagementConfig},
	error::ConfigError,
	middleware::RateLimitRetry,
};

/// Builder for [`ManagementConfig`] values.
#[derive(Debug)]
pub struct ManagementConfigBuilder {
	/// Tenant domain supplied by the caller.
	pub domain: String,
	/// Authentication mode, if one was chosen.
	pub credentials: Option<Credentials>,
	/// Audience override.
	pub audience: Option<String>,
	/// Per-call deadline.
	pub timeout: std::time::Duration,
	/// Enables diagnostics dumps.
	pub debug: bool,
	/// Enables transparent 429 retries.
	pub retry_rate_limits: bool,
	/// Backoff used when the reset header is missing.
	pub rate_limit_fallback: Duration,
	/// `User-Agent` override.
	pub user_agent: Option<String>,
	/// Early-refresh window for cached tokens.
	pub expiry_leeway: Duration,
	/// Talk plain HTTP instead of HTTPS.
	pub insecure: bool,
}
impl ManagementConfigBuilder {
	/// Creates a builder for `domain` with default settings.
	pub fn new(domain: impl Into<String>) -> Self {
		Self {
			domain: domain.into(),
			credentials: None,
			audience: None,
			timeout: ManagementConfig::DEFAULT_TIMEOUT,
			debug: false,
			retry_rate_limits: true,
			rate_limit_fallback: RateLimitRetry::DEFAULT_FALLBACK,
			user_agent: None,
			expiry_leeway: Duration::ZERO,
			insecure: false,
		}
	}

	/// Authenticates with the client-credentials grant.
	pub fn client_credentials(
		mut self,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		self.credentials = Some(Credentials::ClientCredentials {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
		});

		self
	}

	/// Authenticates with a pre-issued token.
	pub fn static_token(mut self, token: impl Into<String>) -> Self {
		self.credentials = Some(Credentials::StaticToken(TokenSecret::new(token)));

		self
	}

	/// Overrides the audience (defaults to the tenant's `/api/v2/` URL).
	pub fn audience(mut self, audience: impl Into<String>) -> Self {
		self.audience = Some(audience.into());

		self
	}

	/// Overrides the per-call deadline.
	pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Toggles request/response dumps.
	pub fn debug(mut self, debug: bool) -> Self {
		self.debug = debug;

		self
	}

	/// Toggles transparent 429 retries.
	pub fn retry_rate_limits(mut self, retry: bool) -> Self {
		self.retry_rate_limits = retry;

		self
	}

	/// Overrides the fallback backoff used when the reset header is unusable.
	pub fn rate_limit_fallback(mut self, fallback: Duration) -> Self {
		self.rate_limit_fallback = fallback;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Refreshes cached tokens `leeway` before they expire.
	pub fn expiry_leeway(mut self, leeway: Duration) -> Self {
		self.expiry_leeway = leeway;

		self
	}

	/// Uses plain HTTP; intended for local mock servers.
	pub fn insecure(mut self, insecure: bool) -> Self {
		self.insecure = insecure;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ManagementConfig, ConfigError> {
		let domain = normalize_domain(&self.domain)?;
		let credentials = self.credentials.ok_or(ConfigError::MissingCredentials)?;

		if self.timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		let scheme = if self.insecure { "http" } else { "https" };
		let origin = Url::parse(&format!("{scheme}://{domain}/"))?;
		let base_url = origin.join("api/v2/")?;
		let token_url = origin.join("oauth/token")?;
		let audience = self.audience.unwrap_or_else(|| format!("https://{domain}/api/v2/"));

		Ok(ManagementConfig {
			domain,
			credentials,
			audience,
			base_url,
			token_url,
			timeout: self.timeout,
			debug: self.debug,
			retry_rate_limits: self.retry_rate_limits,
			rate_limit_fallback: self.rate_limit_fallback,
			user_agent: self.user_agent,
			expiry_leeway: self.expiry_leeway,
		})
	}
}

fn normalize_domain(raw: &str) -> Result<String, ConfigError> {
	let trimmed = raw.trim();
	let domain = trimmed
		.strip_prefix("https://")
		.or_else(|| trimmed.strip_prefix("http://"))
		.unwrap_or(trimmed)
		.trim_end_matches('/');

	if domain.is_empty()
		|| domain.contains(['/', '?', '#', '@'])
		|| domain.chars().any(char::is_whitespace)
	{
		return Err(ConfigError::InvalidDomain { domain: raw.to_owned() });
	}

	Ok(domain.to_owned())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_derive_endpoints_from_domain() {
		let config = ManagementConfig::builder("tenant.example.com")
			.client_credentials("id", "secret")
			.build()
			.expect("Valid configuration should build.");

		assert_eq!(config.base_url.as_str(), "https://tenant.example.com/api/v2/");
		assert_eq!(config.token_url.as_str(), "https://tenant.example.com/oauth/token");
		assert_eq!(config.audience, "https://tenant.example.com/api/v2/");
		assert_eq!(config.timeout, ManagementConfig::DEFAULT_TIMEOUT);
		assert!(config.retry_rate_limits);
		assert!(!config.debug);
		assert_eq!(config.rate_limit_fallback, Duration::seconds(5));
	}

	#[test]
	fn scheme_prefix_and_trailing_slash_are_tolerated() {
		let config = ManagementConfig::builder("https://tenant.example.com/")
			.static_token("token")
			.audience("https://api.example.com/")
			.build()
			.expect("Prefixed domain should build.");

		assert_eq!(config.domain, "tenant.example.com");
		assert_eq!(config.audience, "https://api.example.com/");
	}

	#[test]
	fn insecure_mode_uses_plain_http_with_ports() {
		let config = ManagementConfig::builder("127.0.0.1:8080")
			.static_token("token")
			.insecure(true)
			.build()
			.expect("Mock server address should build.");

		assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/api/v2/");
	}

	#[test]
	fn invalid_inputs_are_rejected() {
		assert!(matches!(
			ManagementConfig::builder("tenant.example.com").build(),
			Err(ConfigError::MissingCredentials)
		));
		assert!(matches!(
			ManagementConfig::builder("  ").static_token("t").build(),
			Err(ConfigError::InvalidDomain { .. })
		));
		assert!(matches!(
			ManagementConfig::builder("tenant.example.com/api").static_token("t").build(),
			Err(ConfigError::InvalidDomain { .. })
		));
		assert!(matches!(
			ManagementConfig::builder("tenant.example.com")
				.static_token("t")
				.timeout(std::time::Duration::ZERO)
				.build(),
			Err(ConfigError::ZeroTimeout)
		));
	}
}
