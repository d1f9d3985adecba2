//! Optional request/response dumps for debugging.

// self
use crate::{
	_prelude::*,
	error::BoxError,
	middleware::{Middleware, Next},
	obs,
	transport::{ApiRequest, ApiResponse, SendFuture},
};

const REDACTED: &str = "<redacted>";

/// Snapshot of one completed exchange, rendered as HTTP-style text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeDump {
	/// Request line, headers, and body.
	pub request: String,
	/// Status line, headers, and body.
	pub response: String,
}
impl ExchangeDump {
	/// Renders both sides of an exchange, redacting credential headers.
	pub fn capture(request: &ApiRequest, response: &ApiResponse) -> Self {
		let mut head = format!("{} {}", request.method, request.url);

		render_headers(&mut head, &request.headers);

		let request = render_body(head, request.body.as_deref().unwrap_or_default());
		let mut head = format!("{}", response.status);

		render_headers(&mut head, &response.headers);

		let response = render_body(head, &response.body);

		Self { request, response }
	}
}
impl Display for ExchangeDump {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}\n\n{}", self.request, self.response)
	}
}

/// Destination for [`ExchangeDump`]s.
///
/// Errors are reported through tracing and otherwise ignored; they never reach the caller.
pub trait DiagnosticsSink
where
	Self: 'static + Send + Sync,
{
	/// Records one exchange.
	fn record(&self, dump: &ExchangeDump) -> Result<(), BoxError>;
}

/// Sink that forwards dumps to `tracing` at `debug` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;
impl DiagnosticsSink for TracingSink {
	fn record(&self, dump: &ExchangeDump) -> Result<(), BoxError> {
		obs::trace_exchange_dump(&dump.to_string());

		Ok(())
	}
}

/// Captures every successfully sent exchange into a [`DiagnosticsSink`].
#[derive(Clone)]
pub struct Diagnostics {
	sink: Arc<dyn DiagnosticsSink>,
}
impl Diagnostics {
	/// Creates a layer emitting into `sink`.
	pub fn new(sink: Arc<dyn DiagnosticsSink>) -> Self {
		Self { sink }
	}
}
impl Default for Diagnostics {
	fn default() -> Self {
		Self::new(Arc::new(TracingSink))
	}
}
impl Middleware for Diagnostics {
	fn handle<'a>(&'a self, request: ApiRequest, next: Next<'a>) -> SendFuture<'a> {
		Box::pin(async move {
			let snapshot = request.clone();
			let response = next.run(request).await?;

			if let Err(e) = self.sink.record(&ExchangeDump::capture(&snapshot, &response)) {
				obs::trace_diagnostics_failure(e.as_ref());
			}

			Ok(response)
		})
	}
}
impl Debug for Diagnostics {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Diagnostics(..)")
	}
}

fn render_headers(out: &mut String, headers: &HeaderMap) {
	for (name, value) in headers {
		let value = if name == http::header::AUTHORIZATION || value.is_sensitive() {
			REDACTED.into()
		} else {
			String::from_utf8_lossy(value.as_bytes()).into_owned()
		};

		out.push('\n');
		out.push_str(name.as_str());
		out.push_str(": ");
		out.push_str(&value);
	}
}

fn render_body(mut head: String, body: &[u8]) -> String {
	if !body.is_empty() {
		head.push_str("\n\n");
		head.push_str(&String::from_utf8_lossy(body));
	}

	head
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		middleware::Pipeline,
		transport::{ApiResponse, Transport},
	};

	#[derive(Default)]
	struct Recording(Mutex<Vec<ExchangeDump>>);
	impl DiagnosticsSink for Recording {
		fn record(&self, dump: &ExchangeDump) -> Result<(), BoxError> {
			self.0.lock().push(dump.clone());

			Ok(())
		}
	}

	struct Failing;
	impl DiagnosticsSink for Failing {
		fn record(&self, _: &ExchangeDump) -> Result<(), BoxError> {
			Err("sink offline".into())
		}
	}

	struct Fixed;
	impl Transport for Fixed {
		fn send(&self, _: ApiRequest) -> SendFuture<'_> {
			Box::pin(async {
				let mut headers = HeaderMap::new();

				headers.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

				Ok(ApiResponse::new(StatusCode::CREATED, headers, br#"{"id":"con_1"}"#.to_vec()))
			})
		}
	}

	fn signed_request() -> ApiRequest {
		let url = Url::parse("https://tenant.example.com/api/v2/connections")
			.expect("Failed to parse test URL.");
		let mut request =
			ApiRequest::new(Method::POST, url).with_json_body(br#"{"name":"db"}"#.to_vec());

		request
			.headers
			.insert(http::header::AUTHORIZATION, HeaderValue::from_static("Bearer secret-token"));

		request
	}

	#[tokio::test]
	async fn dumps_are_redacted_and_response_is_untouched() {
		let sink = Arc::new(Recording::default());
		let pipeline = Pipeline::new(Arc::new(Fixed)).layer(Diagnostics::new(sink.clone()));
		let response = pipeline.send(signed_request()).await.expect("Fixed never fails.");

		assert_eq!(response.status, StatusCode::CREATED);
		assert_eq!(response.body, br#"{"id":"con_1"}"#);

		let dumps = sink.0.lock();
		let dump = dumps.first().expect("One exchange should be recorded.");

		assert!(dump.request.starts_with("POST https://tenant.example.com/api/v2/connections"));
		assert!(dump.request.contains("authorization: <redacted>"));
		assert!(!dump.request.contains("secret-token"));
		assert!(dump.request.ends_with(r#"{"name":"db"}"#));
		assert!(dump.response.starts_with("201 Created"));
		assert!(dump.response.ends_with(r#"{"id":"con_1"}"#));
	}

	#[tokio::test]
	async fn sink_failures_do_not_affect_the_call() {
		let pipeline = Pipeline::new(Arc::new(Fixed)).layer(Diagnostics::new(Arc::new(Failing)));
		let response = pipeline.send(signed_request()).await.expect("Sink errors must be ignored.");

		assert_eq!(response.status, StatusCode::CREATED);
	}
}
