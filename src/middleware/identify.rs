//! Client identification headers stamped on every outgoing request.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	middleware::{Middleware, Next},
	transport::{ApiRequest, SendFuture},
};

/// Header carrying the base64-encoded client descriptor.
pub const CLIENT_INFO_HEADER: &str = "auth0-client";
/// Library name reported to the remote API.
pub const CLIENT_NAME: &str = env!("CARGO_PKG_NAME");
/// Library version reported to the remote API.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Descriptor serialized into the [`CLIENT_INFO_HEADER`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
	/// Product name.
	pub name: String,
	/// Product version.
	pub version: String,
	/// Runtime environment entries.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub env: BTreeMap<String, String>,
}
impl Default for ClientInfo {
	fn default() -> Self {
		let mut env = BTreeMap::new();

		env.insert("rust".into(), env!("CARGO_PKG_RUST_VERSION").into());

		Self { name: CLIENT_NAME.into(), version: CLIENT_VERSION.into(), env }
	}
}
impl ClientInfo {
	/// Encodes the descriptor as unpadded URL-safe base64 JSON.
	pub fn encode(&self) -> Result<String, ConfigError> {
		let json = serde_json::to_vec(self)
			.map_err(|_| ConfigError::InvalidHeader { name: CLIENT_INFO_HEADER })?;

		Ok(URL_SAFE_NO_PAD.encode(json))
	}
}

/// Sets the fixed identification headers before delegating.
#[derive(Clone, Debug)]
pub struct Identify {
	client_info: HeaderValue,
	user_agent: HeaderValue,
}
impl Identify {
	/// Builds the layer from a descriptor and an optional `User-Agent` override.
	pub fn new(info: &ClientInfo, user_agent: Option<&str>) -> Result<Self, ConfigError> {
		let client_info = HeaderValue::from_str(&info.encode()?)
			.map_err(|_| ConfigError::InvalidHeader { name: CLIENT_INFO_HEADER })?;
		let default_agent = format!("{}/{}", info.name, info.version);
		let user_agent = HeaderValue::from_str(user_agent.unwrap_or(&default_agent))
			.map_err(|_| ConfigError::InvalidHeader { name: "user-agent" })?;

		Ok(Self { client_info, user_agent })
	}
}
impl Middleware for Identify {
	fn handle<'a>(&'a self, mut request: ApiRequest, next: Next<'a>) -> SendFuture<'a> {
		request
			.headers
			.insert(HeaderName::from_static(CLIENT_INFO_HEADER), self.client_info.clone());
		request.headers.insert(http::header::USER_AGENT, self.user_agent.clone());

		next.run(request)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn client_info_round_trips_through_base64() {
		let info = ClientInfo::default();
		let encoded = info.encode().expect("Default client info should encode.");
		let decoded = URL_SAFE_NO_PAD.decode(encoded).expect("Header should be valid base64.");
		let parsed: ClientInfo =
			serde_json::from_slice(&decoded).expect("Header should contain client info JSON.");

		assert_eq!(parsed, info);
		assert_eq!(parsed.name, "auth0-management");
	}

	#[test]
	fn user_agent_defaults_to_name_and_version() {
		let layer = Identify::new(&ClientInfo::default(), None).expect("Layer should build.");

		assert_eq!(
			layer.user_agent.to_str().ok(),
			Some(concat!("auth0-management/", env!("CARGO_PKG_VERSION")))
		);
		assert!(Identify::new(&ClientInfo::default(), Some("bad\nagent")).is_err());
	}
}
