//! Auth0 Management API client core.
//!
//! Cached client-credentials tokens and rate-limit aware transport middleware sit underneath
//! discriminator-driven codecs for polymorphic resources.
//!
//! Resource-specific wrappers are thin callers of [`management::Management::request`] and the
//! [`codec`] helpers; everything that needs real engineering lives in the modules below.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod codec;
pub mod config;
pub mod error;
pub mod management;
pub mod middleware;
pub mod obs;
pub mod resource;
pub mod transport;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{ManagementConfig, ManagementConfigBuilder},
		management::Management,
	};

	/// Client identifier used by test configurations.
	pub const TEST_CLIENT_ID: &str = "test-client-id";
	/// Client secret used by test configurations.
	pub const TEST_CLIENT_SECRET: &str = "test-client-secret";
	/// Bearer token used by static-token test configurations.
	pub const TEST_STATIC_TOKEN: &str = "test-static-token";

	/// Returns a client-credentials builder pointed at a plain-HTTP mock server address such as
	/// `127.0.0.1:8080`.
	pub fn test_config_builder(address: impl Display) -> ManagementConfigBuilder {
		ManagementConfig::builder(address.to_string())
			.insecure(true)
			.client_credentials(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
	}

	/// Returns a static-token builder pointed at a plain-HTTP mock server address.
	pub fn static_test_config_builder(address: impl Display) -> ManagementConfigBuilder {
		ManagementConfig::builder(address.to_string()).insecure(true).static_token(TEST_STATIC_TOKEN)
	}

	/// Builds a [`Management`] client from a test builder.
	pub fn build_management(builder: ManagementConfigBuilder) -> Management {
		let config = builder.build().expect("Failed to build test management configuration.");

		Management::new(config).expect("Failed to build test management client.")
	}

	/// Builds a client-credentials [`Management`] client against a plain-HTTP mock server.
	pub fn build_test_management(address: impl Display) -> Management {
		build_management(test_config_builder(address))
	}

	/// Builds a static-token [`Management`] client against a plain-HTTP mock server.
	pub fn build_static_test_management(address: impl Display) -> Management {
		build_management(static_test_config_builder(address))
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header::HeaderName};
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::{Map as JsonMap, Value as JsonValue, value::RawValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
