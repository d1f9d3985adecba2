// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use auth0_management::{_preludet::*, management::RequestOptions};

async fn mock_token<'a>(server: &'a MockServer, token: &str, expires_in: i64) -> Mock<'a> {
	let audience = format!("https://{}/api/v2/", server.address());
	let body = json!({ "access_token": token, "token_type": "Bearer", "expires_in": expires_in });

	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").json_body(json!({
				"audience": audience,
				"client_id": TEST_CLIENT_ID,
				"client_secret": TEST_CLIENT_SECRET,
				"grant_type": "client_credentials",
			}));
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}

async fn mock_stats<'a>(server: &'a MockServer, token: &str) -> Mock<'a> {
	let authorization = format!("Bearer {token}");

	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/v2/stats/active-users")
				.header("authorization", authorization)
				.header_exists("auth0-client")
				.header_exists("user-agent");
			then.status(200).header("content-type", "application/json").body("42");
		})
		.await
}

#[tokio::test]
async fn credential_is_cached_until_expiry() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "cached-token", 3600).await;
	let stats = mock_stats(&server, "cached-token").await;
	let management = build_test_management(server.address());
	let url = management.uri(&["stats", "active-users"]).expect("URI should resolve.");

	for _ in 0..3 {
		let active = management
			.get::<u64>(url.clone(), &RequestOptions::new())
			.await
			.expect("Stats request should succeed.");

		assert_eq!(active, 42);
	}

	token.assert_calls_async(1).await;
	stats.assert_calls_async(3).await;

	let metrics = management.exchange_metrics().expect("Client credentials expose metrics.");

	assert_eq!(metrics.attempts(), 1);
	assert_eq!(metrics.successes(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_use_exchanges_once() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "shared-token", 3600).await;
	let stats = mock_stats(&server, "shared-token").await;
	let management = build_test_management(server.address());
	let url = management.uri(&["stats", "active-users"]).expect("URI should resolve.");
	let handles = (0..8)
		.map(|_| {
			let management = management.clone();
			let url = url.clone();

			tokio::spawn(async move { management.get::<u64>(url, &RequestOptions::new()).await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let active = handle
			.await
			.expect("Request task should not panic.")
			.expect("Concurrent request should succeed.");

		assert_eq!(active, 42);
	}

	token.assert_calls_async(1).await;
	stats.assert_calls_async(8).await;
}

#[tokio::test]
async fn expired_credential_is_replaced_with_a_single_exchange() {
	let server = MockServer::start_async().await;
	// A leeway longer than the lifetime makes every cached credential stale immediately.
	let token = mock_token(&server, "short-lived", 30).await;
	let stats = mock_stats(&server, "short-lived").await;
	let management =
		build_management(test_config_builder(server.address()).expiry_leeway(Duration::minutes(5)));
	let url = management.uri(&["stats", "active-users"]).expect("URI should resolve.");
	let options = RequestOptions::new();
	let (first, second, third) = tokio::join!(
		management.get::<u64>(url.clone(), &options),
		management.get::<u64>(url.clone(), &options),
		management.get::<u64>(url.clone(), &options),
	);

	first.expect("First concurrent request should succeed.");
	second.expect("Second concurrent request should succeed.");
	third.expect("Third concurrent request should succeed.");
	token.assert_calls_async(1).await;
	assert_eq!(management.exchange_metrics().map(|metrics| metrics.coalesced()), Some(2));

	management.get::<u64>(url, &options).await.expect("Follow-up request should succeed.");

	token.assert_calls_async(2).await;
	stats.assert_calls_async(4).await;
}

#[tokio::test]
async fn failed_exchange_surfaces_api_error_and_retries_next_time() {
	let server = MockServer::start_async().await;
	let denied = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"error":"access_denied","error_description":"Unauthorized"}"#);
		})
		.await;
	let management = build_test_management(server.address());
	let url = management.uri(&["stats", "active-users"]).expect("URI should resolve.");

	for _ in 0..2 {
		let err = management
			.get::<u64>(url.clone(), &RequestOptions::new())
			.await
			.expect_err("Exchange failures should propagate.");

		assert_eq!(err.status(), Some(401));
	}

	denied.assert_calls_async(2).await;

	let metrics = management.exchange_metrics().expect("Client credentials expose metrics.");

	assert_eq!(metrics.failures(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_failed_exchange() {
	let server = MockServer::start_async().await;
	let denied = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(401)
				.delay(std::time::Duration::from_millis(200))
				.header("content-type", "application/json")
				.body(r#"{"error":"access_denied","error_description":"Unauthorized"}"#);
		})
		.await;
	let management = build_test_management(server.address());
	let url = management.uri(&["stats", "active-users"]).expect("URI should resolve.");
	let handles = (0..8)
		.map(|_| {
			let management = management.clone();
			let url = url.clone();

			tokio::spawn(async move { management.get::<u64>(url, &RequestOptions::new()).await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let err = handle
			.await
			.expect("Request task should not panic.")
			.expect_err("Every caller should see the shared failure.");

		assert_eq!(err.status(), Some(401));
	}

	denied.assert_calls_async(1).await;

	let metrics = management.exchange_metrics().expect("Client credentials expose metrics.");

	assert_eq!(metrics.attempts(), 1);
	assert_eq!(metrics.coalesced(), 7);
}

#[tokio::test]
async fn static_token_skips_the_exchange() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "never-used", 3600).await;
	let stats = mock_stats(&server, TEST_STATIC_TOKEN).await;
	let management =
		build_management(static_test_config_builder(server.address()).user_agent("ops-bot/1.0"));
	let url = management.uri(&["stats", "active-users"]).expect("URI should resolve.");

	management.get::<u64>(url, &RequestOptions::new()).await.expect("Request should succeed.");

	token.assert_calls_async(0).await;
	stats.assert_calls_async(1).await;
	assert!(management.exchange_metrics().is_none());
}
