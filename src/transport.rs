//! Transport primitives shared by the middleware pipeline and the request executor.
//!
//! [`Transport`] is the single "send" capability every layer speaks. Requests and responses
//! are plain owned values ([`ApiRequest`], [`ApiResponse`]) so middleware can clone and
//! resend them freely. [`ReqwestTransport`] is the default base sender.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, middleware::RateLimitSignal};
#[cfg(feature = "reqwest")] use crate::error::TransportError;

/// Boxed future returned by [`Transport::send`].
pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of delivering one [`ApiRequest`].
///
/// Implementations must be `Send + Sync + 'static` so a single instance can be shared by the
/// executor and the credential exchange. A transport only reports transport failures through
/// `Err`; every HTTP status, including 4xx/5xx, comes back as an [`ApiResponse`].
pub trait Transport
where
	Self: 'static + Send + Sync,
{
	/// Sends the request and resolves once the full response body is read.
	fn send(&self, request: ApiRequest) -> SendFuture<'_>;
}
impl<T> Transport for Arc<T>
where
	T: ?Sized + Transport,
{
	fn send(&self, request: ApiRequest) -> SendFuture<'_> {
		(**self).send(request)
	}
}

/// Owned outbound request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute target URL including the query string.
	pub url: Url,
	/// Request headers.
	pub headers: HeaderMap,
	/// Serialized body, if any.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a request without headers or body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: None }
	}

	/// Attaches a JSON body and the matching `Content-Type` header.
	pub fn with_json_body(mut self, body: Vec<u8>) -> Self {
		self.headers
			.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
		self.body = Some(body);

		self
	}
}

/// Fully buffered inbound response.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response from its parts.
	pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Returns `true` when the response carries no body to decode.
	pub fn is_empty(&self) -> bool {
		self.status == StatusCode::NO_CONTENT || self.body.iter().all(u8::is_ascii_whitespace)
	}

	/// Parses the rate-limit headers, when all of them are present.
	pub fn rate_limit(&self) -> Option<RateLimitSignal> {
		RateLimitSignal::from_headers(&self.headers)
	}
}

/// Thin wrapper around [`ReqwestClient`] acting as the base sender.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn send(&self, request: ApiRequest) -> SendFuture<'_> {
		Box::pin(async move {
			let ApiRequest { method, url, headers, body } = request;
			let mut builder = self.0.request(method, url.clone()).headers(headers);

			if let Some(body) = body {
				builder = builder.body(body);
			}

			let response =
				builder.send().await.map_err(|err| TransportError::network(&url, err))?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await.map_err(|err| TransportError::network(&url, err))?;

			Ok(ApiResponse::new(status, headers, body.to_vec()))
		})
	}
}
