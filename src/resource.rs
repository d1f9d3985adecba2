//! Polymorphic management resources.
//!
//! Each resource has a wire envelope (fixed fields plus the raw payload) and a typed view whose
//! payload is materialized through [`codec`](crate::codec). The typed view is what callers
//! read and write; the envelope only exists while crossing the JSON boundary.

/// Declares a string-backed enum whose unknown values are kept in an `Other` arm.
macro_rules! string_enum {
	(
		$(#[$meta:meta])*
		pub enum $name:ident {
			$( $(#[$vmeta:meta])* $variant:ident => $tag:literal, )+
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$( $(#[$vmeta])* $variant, )+
			/// Value this version of the crate does not know about.
			Other(String),
		}
		impl $name {
			/// Every value with a dedicated arm.
			pub const KNOWN: &'static [Self] = &[$(Self::$variant),+];

			/// Returns the wire representation.
			pub fn as_str(&self) -> &str {
				match self {
					$(Self::$variant => $tag,)+
					Self::Other(other) => other,
				}
			}
		}
		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				match value {
					$($tag => Self::$variant,)+
					other => Self::Other(other.to_owned()),
				}
			}
		}
		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self::from(value.as_str())
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
		impl Serialize for $name {
			fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
			where
				S: serde::Serializer,
			{
				serializer.serialize_str(self.as_str())
			}
		}
		impl<'de> Deserialize<'de> for $name {
			fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
			where
				D: serde::Deserializer<'de>,
			{
				String::deserialize(deserializer).map(Self::from)
			}
		}
	};
}

/// Declares a variant payload: every field optional and omitted when unset, plus a catch-all
/// map so fields without an accessor survive a decode/encode cycle.
macro_rules! payload {
	(
		$(#[$meta:meta])*
		pub struct $name:ident {
			$( $(#[$fmeta:meta])* $field:ident: $ty:ty, )*
		}
	) => {
		#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
		$(#[$meta])*
		pub struct $name {
			$(
				$(#[$fmeta])*
				#[serde(default, skip_serializing_if = "Option::is_none")]
				pub $field: Option<$ty>,
			)*
			/// Fields without a dedicated accessor.
			#[serde(flatten)]
			pub extra: JsonMap<String, JsonValue>,
		}
	};
}

pub mod connection;
pub mod log_stream;

pub use connection::*;
pub use log_stream::*;
