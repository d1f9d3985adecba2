//! Per-call query parameters and deadline override.

// self
use crate::_prelude::*;

/// Accumulated query parameters for one call.
///
/// The executor does not interpret the values; it only appends them to the URL. Setting the
/// same key twice keeps the last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	query: BTreeMap<String, String>,
	timeout: Option<std::time::Duration>,
}
impl RequestOptions {
	/// Creates an empty option set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Zero-based page index.
	pub fn page(self, page: u32) -> Self {
		self.parameter("page", page)
	}

	/// Page size.
	pub fn per_page(self, per_page: u32) -> Self {
		self.parameter("per_page", per_page)
	}

	/// Wraps list results in an object carrying `start`, `limit`, and `total`.
	pub fn include_totals(self, include: bool) -> Self {
		self.parameter("include_totals", include)
	}

	/// Returns only the listed fields.
	pub fn include_fields<I, S>(self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.fields(fields, true)
	}

	/// Returns everything except the listed fields.
	pub fn exclude_fields<I, S>(self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.fields(fields, false)
	}

	/// Lucene-style search query evaluated by the v3 search engine.
	pub fn query(self, query: impl Into<String>) -> Self {
		self.parameter("q", query.into()).parameter("search_engine", "v3")
	}

	/// Checkpoint pagination: start after this identifier.
	pub fn from_checkpoint(self, id: impl Into<String>) -> Self {
		self.parameter("from", id.into())
	}

	/// Checkpoint pagination: number of entries to return.
	pub fn take(self, take: u32) -> Self {
		self.parameter("take", take)
	}

	/// Sets an arbitrary query parameter.
	pub fn parameter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.query.insert(key.into(), value.to_string());

		self
	}

	/// Overrides the client's default deadline for this call.
	pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Returns the deadline override, if any.
	pub fn timeout_override(&self) -> Option<std::time::Duration> {
		self.timeout
	}

	/// Iterates over the accumulated parameters in key order.
	pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.query.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Appends the parameters to `url`'s query string.
	pub fn apply(&self, url: &mut Url) {
		if self.query.is_empty() {
			return;
		}

		url.query_pairs_mut().extend_pairs(self.query_pairs());
	}

	fn fields<I, S>(self, fields: I, include: bool) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let joined = fields.into_iter().map(|field| field.as_ref().to_owned()).collect::<Vec<_>>();

		self.parameter("fields", joined.join(",")).parameter("include_fields", include)
	}
}
