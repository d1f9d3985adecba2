//! `/connections` endpoints.

// crates.io
use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
// self
use crate::{
	_prelude::*,
	management::{Management, RequestOptions},
	resource::Connection,
};

const PATH: &str = "connections";

/// One page of connections.
///
/// The endpoint answers with a bare array, or with `{connections, start, limit, total}` when
/// [`RequestOptions::include_totals`] is set; both shapes decode into this type.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConnectionList {
	/// Connections on this page.
	pub connections: Vec<Connection>,
	/// Offset of the first entry, when totals were requested.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start: Option<u64>,
	/// Page size, when totals were requested.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub limit: Option<u64>,
	/// Total number of connections, when totals were requested.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total: Option<u64>,
}
impl<'de> Deserialize<'de> for ConnectionList {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		struct ListVisitor;
		impl<'de> Visitor<'de> for ListVisitor {
			type Value = ConnectionList;

			fn expecting(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("a connection array or a paged connection object")
			}

			fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
			where
				A: SeqAccess<'de>,
			{
				let mut connections = Vec::with_capacity(seq.size_hint().unwrap_or_default());

				while let Some(connection) = seq.next_element()? {
					connections.push(connection);
				}

				Ok(ConnectionList { connections, ..Default::default() })
			}

			fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				let mut list = ConnectionList::default();

				while let Some(key) = map.next_key::<String>()? {
					match key.as_str() {
						"connections" => list.connections = map.next_value()?,
						"start" => list.start = map.next_value()?,
						"limit" => list.limit = map.next_value()?,
						"total" => list.total = map.next_value()?,
						_ => {
							map.next_value::<IgnoredAny>()?;
						},
					}
				}

				Ok(list)
			}
		}

		deserializer.deserialize_any(ListVisitor)
	}
}

/// Thin wrapper over the executor for `/connections`.
#[derive(Clone, Copy, Debug)]
pub struct ConnectionManager<'a> {
	management: &'a Management,
}
impl<'a> ConnectionManager<'a> {
	pub(crate) fn new(management: &'a Management) -> Self {
		Self { management }
	}

	/// Creates a connection; `connection` is replaced by the stored resource.
	pub async fn create(&self, connection: &mut Connection, options: &RequestOptions) -> Result<()> {
		let url = self.management.uri(&[PATH])?;

		self.management.post(url, connection, options).await
	}

	/// Reads one connection.
	pub async fn read(&self, id: &str, options: &RequestOptions) -> Result<Connection> {
		let url = self.management.uri(&[PATH, id])?;

		self.management.get(url, options).await
	}

	/// Lists connections.
	pub async fn list(&self, options: &RequestOptions) -> Result<ConnectionList> {
		let url = self.management.uri(&[PATH])?;

		self.management.get(url, options).await
	}

	/// Updates a connection; `connection` is replaced by the stored resource.
	pub async fn update(
		&self,
		id: &str,
		connection: &mut Connection,
		options: &RequestOptions,
	) -> Result<()> {
		let url = self.management.uri(&[PATH, id])?;

		self.management.patch(url, connection, options).await
	}

	/// Deletes a connection.
	pub async fn delete(&self, id: &str, options: &RequestOptions) -> Result<()> {
		let url = self.management.uri(&[PATH, id])?;

		self.management.delete(url, options).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::resource::{ConnectionOptions, ConnectionStrategy};

	#[test]
	fn list_accepts_bare_arrays() {
		let list: ConnectionList =
			serde_json::from_str(r#"[{"strategy":"github","options":{"client_id":"gh"}}]"#)
				.expect("Arrays should decode.");

		assert_eq!(list.connections.len(), 1);
		assert_eq!(list.total, None);
		assert!(matches!(list.connections[0].options, Some(ConnectionOptions::GitHub(_))));
	}

	#[test]
	fn list_accepts_paged_objects() {
		let list: ConnectionList = serde_json::from_str(
			r#"{"connections":[{"name":"db","strategy":"auth0"}],"start":0,"limit":50,"total":1,"next":"x"}"#,
		)
		.expect("Paged objects should decode.");

		assert_eq!(list.total, Some(1));
		assert_eq!(list.limit, Some(50));
		assert_eq!(list.connections[0].strategy, Some(ConnectionStrategy::Auth0));
	}
}
