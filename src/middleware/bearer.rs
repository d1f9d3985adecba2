//! Innermost layer attaching the bearer credential right before the request is sent.

// self
use crate::{
	_prelude::*,
	auth::TokenSource,
	error::ConfigError,
	middleware::{Middleware, Next},
	transport::{ApiRequest, SendFuture},
};

/// Asks the [`TokenSource`] for a credential on every send and sets `Authorization`.
///
/// Because the token is fetched per send, a request resent by an outer retry layer picks up a
/// refreshed credential if the previous one expired during the backoff.
#[derive(Clone)]
pub struct Bearer {
	source: Arc<dyn TokenSource>,
}
impl Bearer {
	/// Creates a layer backed by `source`.
	pub fn new(source: Arc<dyn TokenSource>) -> Self {
		Self { source }
	}
}
impl Middleware for Bearer {
	fn handle<'a>(&'a self, mut request: ApiRequest, next: Next<'a>) -> SendFuture<'a> {
		Box::pin(async move {
			let credential = self.source.token().await?;
			let mut value = HeaderValue::from_str(&credential.authorization())
				.map_err(|_| ConfigError::InvalidHeader { name: "authorization" })?;

			value.set_sensitive(true);
			request.headers.insert(http::header::AUTHORIZATION, value);

			next.run(request).await
		})
	}
}
impl Debug for Bearer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Bearer(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		auth::StaticToken,
		middleware::Pipeline,
		transport::{ApiResponse, Transport},
	};

	struct Echo;
	impl Transport for Echo {
		fn send(&self, request: ApiRequest) -> SendFuture<'_> {
			Box::pin(async move { Ok(ApiResponse::new(StatusCode::OK, request.headers, Vec::new())) })
		}
	}

	#[tokio::test]
	async fn authorization_header_is_attached() {
		let pipeline = Pipeline::new(Arc::new(Echo))
			.layer(Bearer::new(Arc::new(StaticToken::new("static-token"))));
		let url = Url::parse("https://tenant.example.com/api/v2/users")
			.expect("Failed to parse test URL.");
		let response =
			pipeline.send(ApiRequest::new(Method::GET, url)).await.expect("Echo never fails.");
		let header = response
			.headers
			.get(http::header::AUTHORIZATION)
			.expect("Authorization header should be present.");

		assert_eq!(header.to_str().ok(), Some("Bearer static-token"));
		assert!(header.is_sensitive());
	}
}
