//! Middleware contract and the composed sender.

// self
use crate::{
	_prelude::*,
	transport::{ApiRequest, SendFuture, Transport},
};

/// A decorator around the "send" capability.
///
/// Layers may inspect or rewrite the request, call [`Next::run`] zero or more times, and
/// inspect or replace the response.
pub trait Middleware
where
	Self: 'static + Send + Sync,
{
	/// Handles the request, delegating to the rest of the chain through `next`.
	fn handle<'a>(&'a self, request: ApiRequest, next: Next<'a>) -> SendFuture<'a>;
}

/// Handle to the remainder of a middleware chain.
#[derive(Clone, Copy)]
pub struct Next<'a> {
	layers: &'a [Arc<dyn Middleware>],
	base: &'a dyn Transport,
}
impl<'a> Next<'a> {
	/// Sends the request through the remaining layers and finally the base transport.
	pub fn run(self, request: ApiRequest) -> SendFuture<'a> {
		match self.layers.split_first() {
			Some((layer, rest)) => layer.handle(request, Next { layers: rest, base: self.base }),
			None => self.base.send(request),
		}
	}
}
impl Debug for Next<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Next").field("remaining_layers", &self.layers.len()).finish()
	}
}

/// Ordered middleware layers (outermost first) composed over a base transport.
#[derive(Clone)]
pub struct Pipeline {
	layers: Vec<Arc<dyn Middleware>>,
	base: Arc<dyn Transport>,
}
impl Pipeline {
	/// Starts a pipeline with no layers over `base`.
	pub fn new(base: Arc<dyn Transport>) -> Self {
		Self { layers: Vec::new(), base }
	}

	/// Appends a layer inside all previously added layers.
	pub fn layer(mut self, middleware: impl Middleware) -> Self {
		self.layers.push(Arc::new(middleware));

		self
	}

	/// Appends a shared layer inside all previously added layers.
	pub fn shared_layer(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.layers.push(middleware);

		self
	}

	/// Returns the number of layers, excluding the base transport.
	pub fn len(&self) -> usize {
		self.layers.len()
	}

	/// Returns `true` when the pipeline forwards straight to the base transport.
	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}
}
impl Transport for Pipeline {
	fn send(&self, request: ApiRequest) -> SendFuture<'_> {
		Next { layers: &self.layers, base: self.base.as_ref() }.run(request)
	}
}
impl Debug for Pipeline {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Pipeline").field("layers", &self.layers.len()).finish()
	}
}
