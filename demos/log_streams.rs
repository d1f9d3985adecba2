//! Lists a tenant's log streams against a mock management API, exchanging client credentials
//! once and decoding each stream's sink by its `type`.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use auth0_management::{
	config::ManagementConfig,
	management::{Management, RequestOptions},
	resource::LogStreamSink,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":86400}",
			);
		})
		.await;
	let streams_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v2/log-streams").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				r#"[
					{"id":"lst_1","name":"ops","type":"datadog","status":"active","sink":{"datadogRegion":"eu","datadogApiKey":"k"}},
					{"id":"lst_2","name":"lab","type":"brand-new-sink","status":"paused","sink":{"foo":"bar"}}
				]"#,
			);
		})
		.await;
	let config = ManagementConfig::builder(server.address().to_string())
		.insecure(true)
		.client_credentials("demo-client", "demo-secret")
		.build()?;
	let management = Management::new(config)?;

	for stream in management.log_streams().list(&RequestOptions::new()).await? {
		let name = stream.name.as_deref().unwrap_or("<unnamed>");

		match &stream.sink {
			Some(LogStreamSink::Datadog(sink)) => println!(
				"{name}: datadog in region {}.",
				sink.datadog_region.as_deref().unwrap_or("<unset>")
			),
			Some(LogStreamSink::Opaque(fields)) =>
				println!("{name}: unrecognized sink with {} field(s).", fields.len()),
			other => println!("{name}: {other:?}."),
		}
	}

	token_mock.assert_async().await;
	streams_mock.assert_async().await;

	Ok(())
}
