//! Immutable bearer credential issued by a [`TokenSource`](crate::auth::TokenSource).

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Bearer credential attached to management requests.
///
/// Credentials are never mutated; a refresh replaces the cached value wholesale.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Token type reported by the issuer (usually `Bearer`).
	pub token_type: String,
	/// Instant at which the credential stops being usable.
	pub expires_at: OffsetDateTime,
}
impl Credential {
	/// Creates a credential that expires `expires_in` after `issued_at`.
	pub fn issued(
		access_token: impl Into<String>,
		token_type: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			token_type: token_type.into(),
			expires_at: issued_at + expires_in,
		}
	}

	/// Returns `true` while `instant < expires_at`.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}

	/// Same as [`is_valid_at`](Self::is_valid_at) but treats the last `leeway` as expired.
	pub fn is_valid_with_leeway(&self, instant: OffsetDateTime, leeway: Duration) -> bool {
		self.is_valid_at(instant + leeway)
	}

	/// Formats the `Authorization` header value.
	///
	/// The scheme is always `Bearer` regardless of the casing the issuer reported.
	pub fn authorization(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
