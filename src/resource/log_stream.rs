//! Log streams, whose `sink` shape is selected by `type`.

// std
use std::sync::LazyLock;
// self
use crate::{
	_prelude::*,
	codec::{self, Variant, VariantRegistry},
	error::DecodeError,
};

string_enum! {
	/// Destination kind of a log stream.
	pub enum LogStreamType {
		/// Generic webhook.
		Http => "http",
		/// Amazon EventBridge.
		EventBridge => "eventbridge",
		/// Azure Event Grid.
		EventGrid => "eventgrid",
		/// Datadog.
		Datadog => "datadog",
		/// Splunk.
		Splunk => "splunk",
		/// Sumo Logic.
		Sumo => "sumo",
		/// Mixpanel.
		Mixpanel => "mixpanel",
		/// Segment.
		Segment => "segment",
	}
}

string_enum! {
	/// Delivery state of a log stream.
	pub enum LogStreamStatus {
		/// Delivering events.
		Active => "active",
		/// Paused by the tenant.
		Paused => "paused",
		/// Suspended after repeated delivery failures.
		Suspended => "suspended",
	}
}

payload! {
	/// Webhook sink.
	#[serde(rename_all = "camelCase")]
	pub struct HttpSink {
		/// Batch format (`JSONARRAY`, `JSONLINES`, `JSONOBJECT`).
		http_content_format: String,
		/// `Content-Type` of each delivery.
		http_content_type: String,
		/// Target URL.
		http_endpoint: String,
		/// `Authorization` header value sent with each delivery.
		http_authorization: String,
		/// Extra headers sent with each delivery.
		http_custom_headers: Vec<JsonValue>,
	}
}

payload! {
	/// Amazon EventBridge sink.
	#[serde(rename_all = "camelCase")]
	pub struct EventBridgeSink {
		/// AWS account receiving events.
		aws_account_id: String,
		/// AWS region.
		aws_region: String,
		/// Partner event source created by the service.
		aws_partner_event_source: String,
	}
}

payload! {
	/// Azure Event Grid sink.
	#[serde(rename_all = "camelCase")]
	pub struct EventGridSink {
		/// Azure subscription.
		azure_subscription_id: String,
		/// Resource group.
		azure_resource_group: String,
		/// Azure region.
		azure_region: String,
		/// Partner topic created by the service.
		azure_partner_topic: String,
	}
}

payload! {
	/// Datadog sink.
	#[serde(rename_all = "camelCase")]
	pub struct DatadogSink {
		/// Datadog site (`us`, `eu`, `us3`, `us5`).
		datadog_region: String,
		/// API key.
		datadog_api_key: String,
	}
}

payload! {
	/// Splunk HTTP event collector sink.
	#[serde(rename_all = "camelCase")]
	pub struct SplunkSink {
		/// Collector host.
		splunk_domain: String,
		/// Collector token.
		splunk_token: String,
		/// Collector port.
		splunk_port: String,
		/// Verify TLS certificates.
		splunk_secure: bool,
	}
}

payload! {
	/// Sumo Logic sink.
	#[serde(rename_all = "camelCase")]
	pub struct SumoSink {
		/// HTTP source address.
		sumo_source_address: String,
	}
}

payload! {
	/// Mixpanel sink.
	#[serde(rename_all = "camelCase")]
	pub struct MixpanelSink {
		/// Data residency (`us` or `eu`).
		mixpanel_region: String,
		/// Project identifier.
		mixpanel_project_id: String,
		/// Service account name.
		mixpanel_service_account_username: String,
		/// Service account secret.
		mixpanel_service_account_password: String,
	}
}

payload! {
	/// Segment sink.
	#[serde(rename_all = "camelCase")]
	pub struct SegmentSink {
		/// Source write key.
		segment_write_key: String,
	}
}

/// Typed `sink` of a [`LogStream`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogStreamSink {
	/// `http`.
	Http(HttpSink),
	/// `eventbridge`.
	EventBridge(EventBridgeSink),
	/// `eventgrid`.
	EventGrid(EventGridSink),
	/// `datadog`.
	Datadog(DatadogSink),
	/// `splunk`.
	Splunk(SplunkSink),
	/// `sumo`.
	Sumo(SumoSink),
	/// `mixpanel`.
	Mixpanel(MixpanelSink),
	/// `segment`.
	Segment(SegmentSink),
	/// Sink of a type without a dedicated arm.
	Opaque(JsonMap<String, JsonValue>),
}
impl Variant for LogStreamSink {
	fn registry() -> &'static VariantRegistry<Self> {
		static REGISTRY: LazyLock<VariantRegistry<LogStreamSink>> = LazyLock::new(|| {
			VariantRegistry::new("log stream sink")
				.register("http", LogStreamSink::Http)
				.register("eventbridge", LogStreamSink::EventBridge)
				.register("eventgrid", LogStreamSink::EventGrid)
				.register("datadog", LogStreamSink::Datadog)
				.register("splunk", LogStreamSink::Splunk)
				.register("sumo", LogStreamSink::Sumo)
				.register("mixpanel", LogStreamSink::Mixpanel)
				.register("segment", LogStreamSink::Segment)
		});

		&REGISTRY
	}

	fn opaque(fields: JsonMap<String, JsonValue>) -> Self {
		Self::Opaque(fields)
	}
}

/// Event filter attached to a log stream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStreamFilter {
	/// Filter kind (currently always `category`).
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Category name, e.g. `auth.login.fail`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

/// A tenant log stream.
#[derive(Clone, Debug, Default)]
pub struct LogStream {
	/// Stream identifier.
	pub id: Option<String>,
	/// Display name.
	pub name: Option<String>,
	/// Destination kind; selects the `sink` shape.
	pub kind: Option<LogStreamType>,
	/// Delivery state.
	pub status: Option<LogStreamStatus>,
	/// Destination configuration.
	pub sink: Option<LogStreamSink>,
	/// Event filters.
	pub filters: Option<Vec<LogStreamFilter>>,
	raw_sink: Option<Box<RawValue>>,
}
impl LogStream {
	/// Creates a stream with a name and destination kind.
	pub fn new(name: impl Into<String>, kind: LogStreamType) -> Self {
		Self { name: Some(name.into()), kind: Some(kind), ..Default::default() }
	}

	/// Sets the typed sink.
	pub fn with_sink(mut self, sink: LogStreamSink) -> Self {
		self.sink = Some(sink);

		self
	}

	/// Returns the sink kept as raw JSON because no type was present.
	pub fn raw_sink(&self) -> Option<&RawValue> {
		self.raw_sink.as_deref()
	}

	/// Splits the stream into its wire envelope.
	pub fn to_envelope(&self) -> Result<LogStreamEnvelope, DecodeError> {
		let sink = match &self.sink {
			Some(sink) => Some(codec::encode_payload(sink)?),
			None => self.raw_sink.clone(),
		};

		Ok(LogStreamEnvelope {
			id: self.id.clone(),
			name: self.name.clone(),
			kind: self.kind.clone(),
			status: self.status.clone(),
			sink,
			filters: self.filters.clone(),
		})
	}
}
impl TryFrom<LogStreamEnvelope> for LogStream {
	type Error = DecodeError;

	fn try_from(envelope: LogStreamEnvelope) -> Result<Self, Self::Error> {
		let LogStreamEnvelope { id, name, kind, status, sink: raw, filters } = envelope;
		let sink = codec::decode_payload::<LogStreamSink>(
			kind.as_ref().map(LogStreamType::as_str),
			raw.as_deref(),
		)?;
		let raw_sink = if kind.is_none() { raw } else { None };

		Ok(Self { id, name, kind, status, sink, filters, raw_sink })
	}
}
impl Serialize for LogStream {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.to_envelope().map_err(serde::ser::Error::custom)?.serialize(serializer)
	}
}
impl<'de> Deserialize<'de> for LogStream {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Self::try_from(LogStreamEnvelope::deserialize(deserializer)?).map_err(serde::de::Error::custom)
	}
}

/// Wire shape of a [`LogStream`]: fixed fields plus raw `sink`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LogStreamEnvelope {
	/// Stream identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Discriminator.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<LogStreamType>,
	/// Delivery state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<LogStreamStatus>,
	/// Untyped sink.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sink: Option<Box<RawValue>>,
	/// Event filters.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filters: Option<Vec<LogStreamFilter>>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unknown_type_yields_opaque_sink() {
		let stream: LogStream =
			serde_json::from_str(r#"{"type":"brand-new-sink","sink":{"foo":"bar"}}"#)
				.expect("Unknown types must decode.");
		let Some(LogStreamSink::Opaque(fields)) = &stream.sink else {
			panic!("Expected an opaque sink, got {:?}.", stream.sink);
		};
		let mut expected = JsonMap::new();

		expected.insert("foo".into(), "bar".into());

		assert_eq!(fields, &expected);
		assert_eq!(stream.kind, Some(LogStreamType::Other("brand-new-sink".into())));
	}

	#[test]
	fn datadog_sink_uses_camel_case_fields() {
		let input = serde_json::json!({
			"id": "lst_1",
			"name": "dd",
			"type": "datadog",
			"status": "active",
			"sink": { "datadogRegion": "eu", "datadogApiKey": "k" },
			"filters": [{ "type": "category", "name": "auth.login.fail" }],
		});
		let stream: LogStream =
			serde_json::from_str(&input.to_string()).expect("Datadog stream should decode.");

		assert_eq!(
			stream.sink,
			Some(LogStreamSink::Datadog(DatadogSink {
				datadog_region: Some("eu".into()),
				datadog_api_key: Some("k".into()),
				..Default::default()
			}))
		);
		assert_eq!(stream.status, Some(LogStreamStatus::Active));
		assert_eq!(serde_json::to_value(&stream).expect("Stream should encode."), input);
	}

	#[test]
	fn every_known_type_round_trips() {
		for kind in LogStreamType::KNOWN {
			let input = serde_json::json!({ "type": kind.as_str(), "sink": { "vendorSpecific": 1 } });
			let stream: LogStream =
				serde_json::from_str(&input.to_string()).expect("Known types should decode.");

			assert!(!matches!(stream.sink, Some(LogStreamSink::Opaque(_))), "type {kind}");
			assert_eq!(serde_json::to_value(&stream).expect("Stream should encode."), input);
		}
	}

	#[test]
	fn stream_without_type_keeps_raw_sink() {
		let stream: LogStream = serde_json::from_str(r#"{"name":"orphan","sink":{"a":1}}"#)
			.expect("Streams without a type should decode.");

		assert!(stream.sink.is_none());
		assert_eq!(stream.raw_sink().map(RawValue::get), Some(r#"{"a":1}"#));
	}
}
