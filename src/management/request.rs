//! Request executor: serialize, send through the pipeline under a deadline, interpret status.

// self
use crate::{
	_prelude::*,
	error::{ApiError, DecodeError},
	management::{Management, RequestOptions},
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::{ApiRequest, Transport},
};

impl Management {
	/// Issues one management call.
	///
	/// For methods that carry a body, `payload` is serialized as JSON. On a 2xx response with a
	/// body, the body is decoded into `payload` in place. `204 No Content` (or an empty body)
	/// leaves `payload` untouched. Any other status becomes an [`ApiError`]. The whole call,
	/// including credential exchange and rate-limit backoff, runs under the deadline from
	/// `options` or the client default; elapsing yields [`Error::Cancelled`].
	pub async fn request<P>(
		&self,
		method: Method,
		url: Url,
		payload: Option<&mut P>,
		options: &RequestOptions,
	) -> Result<()>
	where
		P: Serialize + DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Request;

		let timeout = options.timeout_override().unwrap_or(self.timeout);
		let span = CallSpan::new(KIND, "request");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				tokio::time::timeout(timeout, self.execute(method, url, payload, options))
					.await
					.unwrap_or(Err(Error::Cancelled { timeout }))
			})
			.await;

		match &result {
			Ok(()) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Reads a resource.
	pub async fn get<T>(&self, url: Url, options: &RequestOptions) -> Result<T>
	where
		T: Default + Serialize + DeserializeOwned,
	{
		let mut target = T::default();

		self.request(Method::GET, url, Some(&mut target), options).await?;

		Ok(target)
	}

	/// Creates a resource; the response is decoded back into `payload`.
	pub async fn post<P>(&self, url: Url, payload: &mut P, options: &RequestOptions) -> Result<()>
	where
		P: Serialize + DeserializeOwned,
	{
		self.request(Method::POST, url, Some(payload), options).await
	}

	/// Partially updates a resource; the response is decoded back into `payload`.
	pub async fn patch<P>(&self, url: Url, payload: &mut P, options: &RequestOptions) -> Result<()>
	where
		P: Serialize + DeserializeOwned,
	{
		self.request(Method::PATCH, url, Some(payload), options).await
	}

	/// Replaces a resource; the response is decoded back into `payload`.
	pub async fn put<P>(&self, url: Url, payload: &mut P, options: &RequestOptions) -> Result<()>
	where
		P: Serialize + DeserializeOwned,
	{
		self.request(Method::PUT, url, Some(payload), options).await
	}

	/// Deletes a resource.
	pub async fn delete(&self, url: Url, options: &RequestOptions) -> Result<()> {
		self.request::<JsonValue>(Method::DELETE, url, None, options).await
	}

	async fn execute<P>(
		&self,
		method: Method,
		mut url: Url,
		payload: Option<&mut P>,
		options: &RequestOptions,
	) -> Result<()>
	where
		P: Serialize + DeserializeOwned,
	{
		options.apply(&mut url);

		let mut request = ApiRequest::new(method, url);

		if carries_body(&request.method) {
			if let Some(body) = payload.as_deref() {
				let body = serde_json::to_vec(body).map_err(|source| DecodeError::Request { source })?;

				if body != b"null" {
					request = request.with_json_body(body);
				}
			}
		}

		let response = self.pipeline.send(request).await?;

		if !response.is_success() {
			return Err(ApiError::from_response(response.status, &response.body).into());
		}
		if response.is_empty() {
			return Ok(());
		}

		if let Some(target) = payload {
			let mut de = serde_json::Deserializer::from_slice(&response.body);

			*target = serde_path_to_error::deserialize(&mut de)
				.map_err(|source| DecodeError::Response { source, status: response.status.as_u16() })?;
		}

		Ok(())
	}
}

fn carries_body(method: &Method) -> bool {
	!matches!(*method, Method::GET | Method::HEAD | Method::DELETE)
}
