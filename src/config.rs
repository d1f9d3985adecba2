//! Construction-time configuration for [`Management`](crate::management::Management).
//!
//! A [`ManagementConfig`] is assembled through [`ManagementConfigBuilder`] and validated once;
//! the client never re-reads or mutates it afterwards.

/// Builder API for assembling and validating management configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::TokenSecret};

/// How the client authenticates against the management API.
#[derive(Clone, Debug)]
pub enum Credentials {
	/// Exchange a client identifier and secret for short-lived tokens.
	ClientCredentials {
		/// Application client identifier.
		client_id: String,
		/// Application client secret.
		client_secret: TokenSecret,
	},
	/// Use a pre-issued token as-is.
	StaticToken(TokenSecret),
}

/// Validated client configuration.
#[derive(Clone, Debug)]
pub struct ManagementConfig {
	/// Tenant domain, e.g. `example.eu.auth0.com`.
	pub domain: String,
	/// Authentication mode.
	pub credentials: Credentials,
	/// Audience requested during the client-credentials exchange.
	pub audience: String,
	/// Base URL every management path is resolved against (ends with `/api/v2/`).
	pub base_url: Url,
	/// Token endpoint used by the client-credentials exchange.
	pub token_url: Url,
	/// Deadline applied to each call unless overridden per request.
	pub timeout: std::time::Duration,
	/// Emit request/response dumps through the diagnostics layer.
	pub debug: bool,
	/// Transparently retry `429 Too Many Requests`.
	pub retry_rate_limits: bool,
	/// Backoff used when a 429 response lacks a usable reset header.
	pub rate_limit_fallback: Duration,
	/// Overrides the default `User-Agent`.
	pub user_agent: Option<String>,
	/// Refresh cached tokens this long before they expire.
	pub expiry_leeway: Duration,
}
impl ManagementConfig {
	/// Default per-call deadline.
	pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

	/// Starts a builder for the given tenant domain.
	pub fn builder(domain: impl Into<String>) -> ManagementConfigBuilder {
		ManagementConfigBuilder::new(domain)
	}
}
