//! Client-level error types shared across the transport, executor, and codecs.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used where the concrete source type is not part of the public contract.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Remote API answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// A request or response body could not be (de)serialized.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Token exchange failure shared by every caller that waited on the same exchange.
	#[error(transparent)]
	Exchange(Arc<Error>),

	/// The call's deadline elapsed before a final response arrived.
	#[error("Request was cancelled after the {timeout:?} deadline elapsed.")]
	Cancelled {
		/// Deadline that was applied to the call.
		timeout: std::time::Duration,
	},
}
impl Error {
	/// Returns the underlying error, looking through shared exchange failures.
	pub fn root(&self) -> &Error {
		match self {
			Self::Exchange(shared) => shared.root(),
			other => other,
		}
	}

	/// Returns the HTTP status carried by API errors.
	pub fn status(&self) -> Option<u16> {
		match self.root() {
			Self::Api(err) => Some(err.status),
			_ => None,
		}
	}

	/// Returns `true` when the error is a cancellation caused by an elapsed deadline.
	pub fn is_cancelled(&self) -> bool {
		matches!(self.root(), Self::Cancelled { .. })
	}
}

/// Structured error returned by the remote API for non-2xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
#[error("{status} {error}: {message}")]
pub struct ApiError {
	/// HTTP status code of the response.
	#[serde(rename = "statusCode")]
	pub status: u16,
	/// Short error label (e.g., `Not Found`).
	pub error: String,
	/// Human-readable explanation.
	pub message: String,
	/// Machine-readable error code, when the API supplies one.
	#[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
	pub error_code: Option<String>,
}
impl ApiError {
	/// Returns the HTTP status code.
	pub fn status(&self) -> u16 {
		self.status
	}

	/// Returns the human-readable message.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// Builds an error from a response status and body.
	///
	/// Management endpoints answer with `{statusCode, error, message, errorCode}` while the
	/// token endpoint answers with `{error, error_description}`; both shapes are understood.
	/// Bodies that are not JSON fall back to the canonical reason phrase and the raw text.
	pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
		let reason = status.canonical_reason().unwrap_or("Unknown Status").to_owned();

		match serde_json::from_slice::<ApiErrorBody>(body) {
			Ok(parsed) => {
				let error = parsed.error.unwrap_or_else(|| reason.clone());
				let message = parsed
					.message
					.or(parsed.error_description)
					.unwrap_or_else(|| error.clone());

				Self {
					status: parsed.status_code.unwrap_or_else(|| status.as_u16()),
					error,
					message,
					error_code: parsed.error_code,
				}
			},
			Err(_) => {
				let text = String::from_utf8_lossy(body).trim().to_owned();
				let message = if text.is_empty() { reason.clone() } else { text };

				Self { status: status.as_u16(), error: reason, message, error_code: None }
			},
		}
	}
}

#[derive(Deserialize)]
struct ApiErrorBody {
	#[serde(rename = "statusCode")]
	status_code: Option<u16>,
	error: Option<String>,
	message: Option<String>,
	error_description: Option<String>,
	#[serde(rename = "errorCode")]
	error_code: Option<String>,
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The tenant domain is empty or malformed.
	#[error("Domain `{domain}` is invalid.")]
	InvalidDomain {
		/// Domain supplied by the caller.
		domain: String,
	},
	/// A derived endpoint URL could not be parsed.
	#[error("Endpoint URL is invalid.")]
	InvalidUrl(#[from] url::ParseError),
	/// Neither client credentials nor a static token were configured.
	#[error("Client credentials or a static token must be configured.")]
	MissingCredentials,
	/// The configured timeout is zero.
	#[error("The request timeout must be greater than zero.")]
	ZeroTimeout,
	/// A header value contains characters HTTP does not allow.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeader {
		/// Header name.
		name: &'static str,
	},
	/// The token endpoint returned a non-positive `expires_in`.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Serialization failures for request bodies, response bodies, and polymorphic payloads.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body could not be parsed into the requested type.
	#[error("Response body with status {status} could not be decoded.")]
	Response {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Request payload could not be serialized.
	#[error("Request payload could not be encoded.")]
	Request {
		/// Serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// A polymorphic payload did not match the variant selected by its discriminator.
	#[error("The {resource} payload for `{tag}` could not be decoded.")]
	Variant {
		/// Resource family (e.g., `connection options`).
		resource: &'static str,
		/// Discriminator value that selected the variant.
		tag: String,
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Target URL of the failed call.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(url: &Url, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { url: url.to_string(), source: Box::new(src) }
	}
}
