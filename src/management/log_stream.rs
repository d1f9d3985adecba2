//! `/log-streams` endpoints.

// self
use crate::{
	_prelude::*,
	management::{Management, RequestOptions},
	resource::LogStream,
};

const PATH: &str = "log-streams";

/// Thin wrapper over the executor for `/log-streams`.
#[derive(Clone, Copy, Debug)]
pub struct LogStreamManager<'a> {
	management: &'a Management,
}
impl<'a> LogStreamManager<'a> {
	pub(crate) fn new(management: &'a Management) -> Self {
		Self { management }
	}

	/// Creates a log stream; `stream` is replaced by the stored resource.
	pub async fn create(&self, stream: &mut LogStream, options: &RequestOptions) -> Result<()> {
		let url = self.management.uri(&[PATH])?;

		self.management.post(url, stream, options).await
	}

	/// Reads one log stream.
	pub async fn read(&self, id: &str, options: &RequestOptions) -> Result<LogStream> {
		let url = self.management.uri(&[PATH, id])?;

		self.management.get(url, options).await
	}

	/// Lists every log stream of the tenant.
	pub async fn list(&self, options: &RequestOptions) -> Result<Vec<LogStream>> {
		let url = self.management.uri(&[PATH])?;

		self.management.get(url, options).await
	}

	/// Updates a log stream; `stream` is replaced by the stored resource.
	pub async fn update(
		&self,
		id: &str,
		stream: &mut LogStream,
		options: &RequestOptions,
	) -> Result<()> {
		let url = self.management.uri(&[PATH, id])?;

		self.management.patch(url, stream, options).await
	}

	/// Deletes a log stream.
	pub async fn delete(&self, id: &str, options: &RequestOptions) -> Result<()> {
		let url = self.management.uri(&[PATH, id])?;

		self.management.delete(url, options).await
	}
}
