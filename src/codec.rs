//! Discriminator-driven codec for resources whose payload shape varies by a sibling field.
//!
//! A resource is decoded in two steps. Its wire envelope captures the fixed fields plus the
//! payload as raw JSON ([`RawValue`]); the discriminator then selects a factory from the
//! resource's [`VariantRegistry`], which materializes the typed variant. Unknown
//! discriminators never fail: they produce the variant's opaque arm holding the payload as a
//! JSON object. Encoding runs the other way: the variant is serialized to raw JSON first and
//! placed into the envelope, which is then serialized as a whole.

// self
use crate::{_prelude::*, error::DecodeError};

/// Factory materializing one variant arm from raw JSON.
pub type VariantFactory<V> = Box<dyn Fn(&RawValue) -> serde_json::Result<V> + Send + Sync>;

/// Closed set of payload shapes selected by a discriminator string.
///
/// Implementations are plain enums: one arm per registered shape plus an opaque arm for
/// discriminators the registry does not know.
pub trait Variant
where
	Self: 'static + Sized + Serialize,
{
	/// Returns the process-wide registry for this payload family.
	fn registry() -> &'static VariantRegistry<Self>;

	/// Wraps a payload whose discriminator is not registered.
	fn opaque(fields: JsonMap<String, JsonValue>) -> Self;
}

/// Read-only map from discriminator to variant factory.
///
/// Registries are built once (typically inside a `LazyLock`) and shared by every decode.
pub struct VariantRegistry<V> {
	resource: &'static str,
	factories: HashMap<&'static str, VariantFactory<V>>,
}
impl<V> VariantRegistry<V> {
	/// Creates an empty registry for the named payload family (used in error messages).
	pub fn new(resource: &'static str) -> Self {
		Self { resource, factories: HashMap::new() }
	}

	/// Registers `T` under `tag`, wrapped into the variant enum by `wrap`.
	pub fn register<T>(mut self, tag: &'static str, wrap: fn(T) -> V) -> Self
	where
		T: 'static + DeserializeOwned,
		V: 'static,
	{
		self.factories.insert(
			tag,
			Box::new(move |raw: &RawValue| serde_json::from_str::<T>(raw.get()).map(wrap)),
		);

		self
	}

	/// Returns the payload family name.
	pub fn resource(&self) -> &'static str {
		self.resource
	}

	/// Returns `true` when `tag` has a dedicated variant.
	pub fn contains(&self, tag: &str) -> bool {
		self.factories.contains_key(tag)
	}

	/// Iterates over the registered discriminators in no particular order.
	pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.factories.keys().copied()
	}

	/// Returns the number of registered discriminators.
	pub fn len(&self) -> usize {
		self.factories.len()
	}

	/// Returns `true` when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.factories.is_empty()
	}
}
impl<V> VariantRegistry<V>
where
	V: Variant,
{
	/// Materializes the payload for `tag`, falling back to [`Variant::opaque`].
	pub fn resolve(&self, tag: &str, raw: &RawValue) -> Result<V, DecodeError> {
		let variant_error = |source| DecodeError::Variant {
			resource: self.resource,
			tag: tag.to_owned(),
			source,
		};

		match self.factories.get(tag) {
			Some(factory) => factory(raw).map_err(variant_error),
			None => serde_json::from_str::<JsonMap<String, JsonValue>>(raw.get())
				.map(V::opaque)
				.map_err(variant_error),
		}
	}
}
impl<V> Debug for VariantRegistry<V> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut tags = self.factories.keys().collect::<Vec<_>>();

		tags.sort_unstable();

		f.debug_struct("VariantRegistry")
			.field("resource", &self.resource)
			.field("tags", &tags)
			.finish()
	}
}

/// Decodes an envelope's raw payload.
///
/// Without a discriminator or without a payload nothing is resolved and `None` is returned.
pub fn decode_payload<V>(tag: Option<&str>, raw: Option<&RawValue>) -> Result<Option<V>, DecodeError>
where
	V: Variant,
{
	match (tag, raw) {
		(Some(tag), Some(raw)) => V::registry().resolve(tag, raw).map(Some),
		_ => Ok(None),
	}
}

/// Encodes a typed payload into the raw slot of an envelope.
pub fn encode_payload<V>(payload: &V) -> Result<Box<RawValue>, DecodeError>
where
	V: Variant,
{
	serde_json::value::to_raw_value(payload).map_err(|source| DecodeError::Request { source })
}
