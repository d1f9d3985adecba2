//! Identity connections, whose `options` shape is selected by `strategy`.

// std
use std::sync::LazyLock;
// self
use crate::{
	_prelude::*,
	codec::{self, Variant, VariantRegistry},
	error::DecodeError,
};

string_enum! {
	/// Identity provider behind a connection.
	pub enum ConnectionStrategy {
		/// Username/password database.
		Auth0 => "auth0",
		/// Google social login.
		GoogleOAuth2 => "google-oauth2",
		/// Facebook social login.
		Facebook => "facebook",
		/// Sign in with Apple.
		Apple => "apple",
		/// LinkedIn social login.
		LinkedIn => "linkedin",
		/// GitHub social login.
		GitHub => "github",
		/// Microsoft account.
		WindowsLive => "windowslive",
		/// Salesforce.
		Salesforce => "salesforce",
		/// Salesforce community.
		SalesforceCommunity => "salesforce-community",
		/// Salesforce sandbox.
		SalesforceSandbox => "salesforce-sandbox",
		/// Passwordless email.
		Email => "email",
		/// Passwordless SMS.
		Sms => "sms",
		/// OpenID Connect enterprise connection.
		Oidc => "oidc",
		/// Okta Workforce.
		Okta => "okta",
		/// Generic OAuth 2.0 provider.
		OAuth2 => "oauth2",
		/// Azure Active Directory.
		Waad => "waad",
		/// Active Directory Federation Services.
		Adfs => "adfs",
		/// Active Directory / LDAP.
		Ad => "ad",
		/// SAML identity provider.
		Samlp => "samlp",
		/// Google Workspace.
		GoogleApps => "google-apps",
	}
}

payload! {
	/// Options of a username/password database connection.
	pub struct Auth0Options {
		/// Password strength preset (`none`, `low`, `fair`, `good`, `excellent`).
		#[serde(rename = "passwordPolicy")]
		password_policy: String,
		/// Password history settings.
		password_history: JsonValue,
		/// Reject passwords containing user profile data.
		password_no_personal_info: JsonValue,
		/// Reject common dictionary passwords.
		password_dictionary: JsonValue,
		/// Minimum length and character-class rules.
		password_complexity_options: JsonValue,
		/// Use custom database scripts.
		#[serde(rename = "enabledDatabaseCustomization")]
		enabled_database_customization: bool,
		/// Block brute-force attempts.
		brute_force_protection: bool,
		/// Lazily migrate users from a legacy store.
		import_mode: bool,
		/// Disallow self sign-up.
		disable_signup: bool,
		/// Require a username besides the email.
		requires_username: bool,
		/// Username length constraints and similar validation.
		validation: JsonValue,
		/// Custom database action scripts keyed by action.
		#[serde(rename = "customScripts")]
		custom_scripts: BTreeMap<String, String>,
		/// Values exposed to custom scripts.
		configuration: BTreeMap<String, String>,
		/// Attributes not persisted to the user profile.
		non_persistent_attrs: Vec<String>,
	}
}

payload! {
	/// Options of a Google social connection.
	pub struct GoogleOAuth2Options {
		/// OAuth client identifier.
		client_id: String,
		/// OAuth client secret.
		client_secret: String,
		/// Audiences accepted for native sign-in.
		allowed_audiences: Vec<String>,
		/// Request the email address.
		email: bool,
		/// Request the basic profile.
		profile: bool,
		/// Additional scopes.
		scope: Vec<String>,
		/// When root attributes are refreshed from the provider.
		set_user_root_attributes: String,
		/// Attributes not persisted to the user profile.
		non_persistent_attrs: Vec<String>,
	}
}

payload! {
	/// Options of a Facebook social connection.
	pub struct FacebookOptions {
		/// App identifier.
		client_id: String,
		/// App secret.
		client_secret: String,
		/// Request the email address.
		email: bool,
		/// Request the public profile.
		public_profile: bool,
		/// Comma-separated scopes.
		scope: String,
		/// When root attributes are refreshed from the provider.
		set_user_root_attributes: String,
		/// Attributes not persisted to the user profile.
		non_persistent_attrs: Vec<String>,
	}
}

payload! {
	/// Options of a Sign in with Apple connection.
	pub struct AppleOptions {
		/// Services identifier.
		client_id: String,
		/// Private key used to sign the client secret.
		#[serde(rename = "app_secret")]
		client_secret: String,
		/// Developer team identifier.
		team_id: String,
		/// Key identifier.
		kid: String,
		/// Request the user's name.
		name: bool,
		/// Request the email address.
		email: bool,
		/// Space-separated scopes.
		scope: String,
	}
}

payload! {
	/// Options of a LinkedIn social connection.
	pub struct LinkedInOptions {
		/// Client identifier.
		client_id: String,
		/// Client secret.
		client_secret: String,
		/// LinkedIn API generation used by the strategy.
		strategy_version: i64,
		/// Request the email address.
		email: bool,
		/// Request the profile.
		profile: bool,
		/// Request the basic profile.
		basic_profile: bool,
		/// Additional scopes.
		scope: Vec<String>,
	}
}

payload! {
	/// Options of a GitHub social connection.
	pub struct GitHubOptions {
		/// Client identifier.
		client_id: String,
		/// Client secret.
		client_secret: String,
		/// Request the email address.
		email: bool,
		/// Read the user profile.
		read_user: bool,
		/// Read organization membership.
		read_org: bool,
		/// Access public repositories.
		public_repo: bool,
		/// Access private repositories.
		repo: bool,
		/// Additional scopes.
		scope: Vec<String>,
	}
}

payload! {
	/// Options of a Microsoft account connection.
	pub struct WindowsLiveOptions {
		/// Application identifier.
		client_id: String,
		/// Application secret.
		client_secret: String,
		/// Microsoft API generation used by the strategy.
		strategy_version: i64,
		/// Request offline access.
		offline_access: bool,
		/// Request the basic profile.
		signin: bool,
		/// Additional scopes.
		scope: Vec<String>,
	}
}

payload! {
	/// Options shared by the Salesforce strategies.
	pub struct SalesforceOptions {
		/// Consumer key.
		client_id: String,
		/// Consumer secret.
		client_secret: String,
		/// Request the profile.
		profile: bool,
		/// Community base URL (community strategy only).
		community_base_url: String,
		/// Additional scopes.
		scope: Vec<String>,
	}
}

payload! {
	/// Options of a passwordless email connection.
	pub struct EmailOptions {
		/// Connection display name in the email.
		name: String,
		/// Email template (`from`, `subject`, `body`, `syntax`).
		email: JsonValue,
		/// One-time-password length and lifetime.
		totp: JsonValue,
		/// Extra authorization parameters forwarded in the link.
		#[serde(rename = "authParams")]
		auth_params: JsonValue,
		/// Disallow self sign-up.
		disable_signup: bool,
		/// Block brute-force attempts.
		brute_force_protection: bool,
	}
}

payload! {
	/// Options of a passwordless SMS connection.
	pub struct SmsOptions {
		/// Connection display name.
		name: String,
		/// Sender phone number.
		from: String,
		/// Template syntax (`liquid` or `md_with_macros`).
		syntax: String,
		/// Message template.
		template: String,
		/// One-time-password length and lifetime.
		totp: JsonValue,
		/// Twilio messaging service.
		messaging_service_sid: String,
		/// Twilio account identifier.
		twilio_sid: String,
		/// Twilio auth token.
		twilio_token: String,
		/// Delivery provider (`twilio` or `sms_gateway`).
		provider: String,
		/// Custom gateway URL.
		gateway_url: String,
		/// Forward request information to the gateway.
		forward_req_info: bool,
		/// Disallow self sign-up.
		disable_signup: bool,
		/// Block brute-force attempts.
		brute_force_protection: bool,
	}
}

payload! {
	/// Options of an OpenID Connect connection.
	pub struct OidcOptions {
		/// Client identifier.
		client_id: String,
		/// Client secret.
		client_secret: String,
		/// Flow type (`front_channel` or `back_channel`).
		#[serde(rename = "type")]
		kind: String,
		/// Discovery document URL.
		discovery_url: String,
		/// Issuer identifier.
		issuer: String,
		/// Authorization endpoint.
		authorization_endpoint: String,
		/// Token endpoint.
		token_endpoint: String,
		/// Userinfo endpoint.
		userinfo_endpoint: String,
		/// JWKS endpoint.
		jwks_uri: String,
		/// Tenant domain for home realm discovery.
		tenant_domain: String,
		/// Additional domains for home realm discovery.
		domain_aliases: Vec<String>,
		/// Icon shown on the login button.
		icon_url: String,
		/// Space-separated scopes.
		scope: String,
	}
}

payload! {
	/// Options of an Okta Workforce connection.
	pub struct OktaOptions {
		/// Client identifier.
		client_id: String,
		/// Client secret.
		client_secret: String,
		/// Okta domain.
		domain: String,
		/// Additional domains for home realm discovery.
		domain_aliases: Vec<String>,
		/// Issuer identifier.
		issuer: String,
		/// Authorization endpoint.
		authorization_endpoint: String,
		/// Token endpoint.
		token_endpoint: String,
		/// Userinfo endpoint.
		userinfo_endpoint: String,
		/// JWKS endpoint.
		jwks_uri: String,
		/// Space-separated scopes.
		scope: String,
	}
}

payload! {
	/// Options of a generic OAuth 2.0 connection.
	pub struct OAuth2Options {
		/// Client identifier.
		client_id: String,
		/// Client secret.
		client_secret: String,
		/// Authorization URL.
		#[serde(rename = "authorizationURL")]
		authorization_url: String,
		/// Token URL.
		#[serde(rename = "tokenURL")]
		token_url: String,
		/// Scopes, as a string or list depending on the provider.
		scope: JsonValue,
		/// Profile-fetching scripts keyed by name.
		scripts: BTreeMap<String, String>,
		/// Extra headers sent to the provider.
		#[serde(rename = "customHeaders")]
		custom_headers: BTreeMap<String, String>,
		/// Use PKCE on the authorization code exchange.
		pkce_enabled: bool,
	}
}

payload! {
	/// Options of an Azure Active Directory connection.
	pub struct WaadOptions {
		/// Application identifier.
		client_id: String,
		/// Application secret.
		client_secret: String,
		/// App ID URI.
		app_id: String,
		/// Azure AD domain.
		tenant_domain: String,
		/// Additional domains for home realm discovery.
		domain_aliases: Vec<String>,
		/// Sign in with WS-Federation.
		use_wsfed: bool,
		/// Protocol (`openid-connect` or `ws-federation`).
		waad_protocol: String,
		/// Graph API version (`microsoft-identity-platform-v2.0` or `azure-active-directory-v1.0`).
		identity_api: String,
		/// Request the basic profile.
		basic_profile: bool,
		/// Request the extended profile.
		ext_profile: bool,
		/// Request group membership.
		ext_groups: bool,
		/// Upper bound for retrieved groups.
		max_groups_to_retrieve: String,
		/// Use the common endpoint for multi-tenant apps.
		use_common_endpoint: bool,
	}
}

payload! {
	/// Options of an ADFS connection.
	pub struct AdfsOptions {
		/// ADFS federation metadata URL.
		#[serde(rename = "adfs_server")]
		server: String,
		/// Inline federation metadata.
		fed_metadata_xml: String,
		/// Sign-in endpoint.
		sign_in_endpoint: String,
		/// Tenant domain for home realm discovery.
		tenant_domain: String,
		/// Additional domains for home realm discovery.
		domain_aliases: Vec<String>,
		/// Signing certificate thumbprints.
		thumbprints: Vec<String>,
		/// Attribute mapping.
		fields_map: JsonValue,
	}
}

payload! {
	/// Options of an Active Directory / LDAP connection.
	pub struct AdOptions {
		/// Tenant domain for home realm discovery.
		tenant_domain: String,
		/// Additional domains for home realm discovery.
		domain_aliases: Vec<String>,
		/// IP ranges allowed for Kerberos.
		ips: Vec<String>,
		/// Connector certificates.
		certs: Vec<String>,
		/// Enable certificate authentication.
		#[serde(rename = "certAuth")]
		cert_auth: bool,
		/// Enable Kerberos.
		kerberos: bool,
		/// Disable credential caching.
		disable_cache: bool,
		/// Block brute-force attempts.
		brute_force_protection: bool,
	}
}

payload! {
	/// Options of a SAML connection.
	pub struct SamlpOptions {
		/// IdP signing certificate.
		#[serde(rename = "signingCert")]
		signing_cert: String,
		/// IdP sign-in URL.
		#[serde(rename = "signInEndpoint")]
		sign_in_endpoint: String,
		/// IdP sign-out URL.
		#[serde(rename = "signOutEndpoint")]
		sign_out_endpoint: String,
		/// Sign the SAML request.
		#[serde(rename = "signSAMLRequest")]
		sign_saml_request: bool,
		/// Signature algorithm.
		#[serde(rename = "signatureAlgorithm")]
		signature_algorithm: String,
		/// Digest algorithm.
		#[serde(rename = "digestAlgorithm")]
		digest_algorithm: String,
		/// Request binding.
		#[serde(rename = "protocolBinding")]
		protocol_binding: String,
		/// Metadata URL.
		#[serde(rename = "metadataUrl")]
		metadata_url: String,
		/// Inline metadata.
		#[serde(rename = "metadataXml")]
		metadata_xml: String,
		/// Attribute used as the user identifier.
		user_id_attribute: String,
		/// Attribute mapping.
		#[serde(rename = "fieldsMap")]
		fields_map: JsonValue,
		/// IdP-initiated login settings.
		#[serde(rename = "idpinitiated")]
		idp_initiated: JsonValue,
		/// Tenant domain for home realm discovery.
		tenant_domain: String,
		/// Additional domains for home realm discovery.
		domain_aliases: Vec<String>,
		/// Log SAML exchanges.
		debug: bool,
	}
}

payload! {
	/// Options of a Google Workspace connection.
	pub struct GoogleAppsOptions {
		/// OAuth client identifier.
		client_id: String,
		/// OAuth client secret.
		client_secret: String,
		/// Workspace domain.
		domain: String,
		/// Tenant domain for home realm discovery.
		tenant_domain: String,
		/// Additional domains for home realm discovery.
		domain_aliases: Vec<String>,
		/// Allow the directory API to list users.
		api_enable_users: bool,
		/// Request group membership.
		ext_groups: bool,
		/// Request the admin flag.
		ext_is_admin: bool,
		/// Request the suspended flag.
		ext_is_suspended: bool,
		/// Additional scopes.
		scope: Vec<String>,
	}
}

/// Typed `options` of a [`Connection`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConnectionOptions {
	/// `auth0`.
	Auth0(Auth0Options),
	/// `google-oauth2`.
	GoogleOAuth2(GoogleOAuth2Options),
	/// `facebook`.
	Facebook(FacebookOptions),
	/// `apple`.
	Apple(AppleOptions),
	/// `linkedin`.
	LinkedIn(LinkedInOptions),
	/// `github`.
	GitHub(GitHubOptions),
	/// `windowslive`.
	WindowsLive(WindowsLiveOptions),
	/// `salesforce`, `salesforce-community`, and `salesforce-sandbox`.
	Salesforce(SalesforceOptions),
	/// `email`.
	Email(EmailOptions),
	/// `sms`.
	Sms(SmsOptions),
	/// `oidc`.
	Oidc(OidcOptions),
	/// `okta`.
	Okta(OktaOptions),
	/// `oauth2`.
	OAuth2(OAuth2Options),
	/// `waad`.
	Waad(WaadOptions),
	/// `adfs`.
	Adfs(AdfsOptions),
	/// `ad`.
	Ad(AdOptions),
	/// `samlp`.
	Samlp(SamlpOptions),
	/// `google-apps`.
	GoogleApps(GoogleAppsOptions),
	/// Options of a strategy without a dedicated arm.
	Opaque(JsonMap<String, JsonValue>),
}
impl Variant for ConnectionOptions {
	fn registry() -> &'static VariantRegistry<Self> {
		static REGISTRY: LazyLock<VariantRegistry<ConnectionOptions>> = LazyLock::new(|| {
			VariantRegistry::new("connection options")
				.register("auth0", ConnectionOptions::Auth0)
				.register("google-oauth2", ConnectionOptions::GoogleOAuth2)
				.register("facebook", ConnectionOptions::Facebook)
				.register("apple", ConnectionOptions::Apple)
				.register("linkedin", ConnectionOptions::LinkedIn)
				.register("github", ConnectionOptions::GitHub)
				.register("windowslive", ConnectionOptions::WindowsLive)
				.register("salesforce", ConnectionOptions::Salesforce)
				.register("salesforce-community", ConnectionOptions::Salesforce)
				.register("salesforce-sandbox", ConnectionOptions::Salesforce)
				.register("email", ConnectionOptions::Email)
				.register("sms", ConnectionOptions::Sms)
				.register("oidc", ConnectionOptions::Oidc)
				.register("okta", ConnectionOptions::Okta)
				.register("oauth2", ConnectionOptions::OAuth2)
				.register("waad", ConnectionOptions::Waad)
				.register("adfs", ConnectionOptions::Adfs)
				.register("ad", ConnectionOptions::Ad)
				.register("samlp", ConnectionOptions::Samlp)
				.register("google-apps", ConnectionOptions::GoogleApps)
		});

		&REGISTRY
	}

	fn opaque(fields: JsonMap<String, JsonValue>) -> Self {
		Self::Opaque(fields)
	}
}

/// An identity connection.
///
/// `options` is materialized from `strategy` on decode. A connection decoded without a
/// strategy keeps its options as raw JSON and writes them back unchanged on encode.
#[derive(Clone, Debug, Default)]
pub struct Connection {
	/// Connection identifier.
	pub id: Option<String>,
	/// Unique connection name.
	pub name: Option<String>,
	/// Name shown on the login page.
	pub display_name: Option<String>,
	/// Identity provider; selects the `options` shape.
	pub strategy: Option<ConnectionStrategy>,
	/// Strategy-specific configuration.
	pub options: Option<ConnectionOptions>,
	/// Applications allowed to use the connection.
	pub enabled_clients: Option<Vec<String>>,
	/// Connection is available to every tenant application.
	pub is_domain_connection: Option<bool>,
	/// Show the connection as a button on the login page.
	pub show_as_button: Option<bool>,
	/// Realms used for home realm discovery.
	pub realms: Option<Vec<String>>,
	/// Free-form string metadata.
	pub metadata: Option<BTreeMap<String, String>>,
	raw_options: Option<Box<RawValue>>,
}
impl Connection {
	/// Creates a connection with a name and strategy.
	pub fn new(name: impl Into<String>, strategy: ConnectionStrategy) -> Self {
		Self { name: Some(name.into()), strategy: Some(strategy), ..Default::default() }
	}

	/// Sets typed options.
	pub fn with_options(mut self, options: ConnectionOptions) -> Self {
		self.options = Some(options);

		self
	}

	/// Returns options that could not be typed because no strategy was present.
	pub fn raw_options(&self) -> Option<&RawValue> {
		self.raw_options.as_deref()
	}

	/// Splits the connection into its wire envelope.
	pub fn to_envelope(&self) -> Result<ConnectionEnvelope, DecodeError> {
		let options = match &self.options {
			Some(options) => Some(codec::encode_payload(options)?),
			None => self.raw_options.clone(),
		};

		Ok(ConnectionEnvelope {
			id: self.id.clone(),
			name: self.name.clone(),
			display_name: self.display_name.clone(),
			strategy: self.strategy.clone(),
			options,
			enabled_clients: self.enabled_clients.clone(),
			is_domain_connection: self.is_domain_connection,
			show_as_button: self.show_as_button,
			realms: self.realms.clone(),
			metadata: self.metadata.clone(),
		})
	}
}
impl TryFrom<ConnectionEnvelope> for Connection {
	type Error = DecodeError;

	fn try_from(envelope: ConnectionEnvelope) -> Result<Self, Self::Error> {
		let ConnectionEnvelope {
			id,
			name,
			display_name,
			strategy,
			options: raw,
			enabled_clients,
			is_domain_connection,
			show_as_button,
			realms,
			metadata,
		} = envelope;
		let options = codec::decode_payload::<ConnectionOptions>(
			strategy.as_ref().map(ConnectionStrategy::as_str),
			raw.as_deref(),
		)?;
		let raw_options = if strategy.is_none() { raw } else { None };

		Ok(Self {
			id,
			name,
			display_name,
			strategy,
			options,
			enabled_clients,
			is_domain_connection,
			show_as_button,
			realms,
			metadata,
			raw_options,
		})
	}
}
impl Serialize for Connection {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.to_envelope().map_err(serde::ser::Error::custom)?.serialize(serializer)
	}
}
impl<'de> Deserialize<'de> for Connection {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Self::try_from(ConnectionEnvelope::deserialize(deserializer)?).map_err(serde::de::Error::custom)
	}
}

/// Wire shape of a [`Connection`]: fixed fields plus raw `options`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConnectionEnvelope {
	/// Connection identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Unique connection name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Name shown on the login page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Discriminator.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub strategy: Option<ConnectionStrategy>,
	/// Untyped options.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<Box<RawValue>>,
	/// Applications allowed to use the connection.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub enabled_clients: Option<Vec<String>>,
	/// Connection is available to every tenant application.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_domain_connection: Option<bool>,
	/// Show the connection as a button on the login page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub show_as_button: Option<bool>,
	/// Realms used for home realm discovery.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub realms: Option<Vec<String>>,
	/// Free-form string metadata.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn round_trip(input: &str) -> JsonValue {
		let connection: Connection = serde_json::from_str(input).expect("Connection should decode.");

		serde_json::to_value(&connection).expect("Connection should encode.")
	}

	#[test]
	fn google_options_decode_into_typed_arm() {
		let connection: Connection =
			serde_json::from_str(r#"{"strategy":"google-oauth2","options":{"client_id":"abc"}}"#)
				.expect("Connection should decode.");
		let Some(ConnectionOptions::GoogleOAuth2(options)) = &connection.options else {
			panic!("Expected Google options, got {:?}.", connection.options);
		};

		assert_eq!(connection.strategy, Some(ConnectionStrategy::GoogleOAuth2));
		assert_eq!(options.client_id.as_deref(), Some("abc"));
		assert!(options.extra.is_empty());
	}

	#[test]
	fn every_known_strategy_round_trips() {
		for strategy in ConnectionStrategy::KNOWN {
			let input = serde_json::json!({
				"strategy": strategy.as_str(),
				"options": { "client_id": "abc", "custom_flag": true },
			});

			assert_eq!(round_trip(&input.to_string()), input, "strategy {strategy}");
			assert!(ConnectionOptions::registry().contains(strategy.as_str()));
		}
	}

	#[test]
	fn unknown_strategy_keeps_options_as_map() {
		let connection: Connection =
			serde_json::from_str(r#"{"strategy":"pingfederate","options":{"pingFederateBaseUrl":"x"}}"#)
				.expect("Unknown strategies must decode.");

		assert_eq!(connection.strategy, Some(ConnectionStrategy::Other("pingfederate".into())));
		assert!(matches!(
			connection.options,
			Some(ConnectionOptions::Opaque(ref fields)) if fields["pingFederateBaseUrl"] == "x"
		));
	}

	#[test]
	fn missing_strategy_preserves_raw_options() {
		let input = r#"{"name":"legacy","options":{"anything":[1,2,3]}}"#;
		let connection: Connection = serde_json::from_str(input).expect("Connection should decode.");

		assert!(connection.options.is_none());
		assert_eq!(connection.raw_options().map(RawValue::get), Some(r#"{"anything":[1,2,3]}"#));
		assert_eq!(round_trip(input), serde_json::from_str::<JsonValue>(input).expect("Valid JSON."));
	}

	#[test]
	fn empty_options_decode_to_default_arm() {
		let connection: Connection = serde_json::from_str(r#"{"strategy":"auth0","options":{}}"#)
			.expect("Empty options should decode.");

		assert_eq!(connection.options, Some(ConnectionOptions::Auth0(Auth0Options::default())));
	}

	#[test]
	fn mistyped_options_fail_with_variant_error() {
		let err = serde_json::from_str::<Connection>(
			r#"{"strategy":"auth0","options":{"brute_force_protection":"yes"}}"#,
		)
		.expect_err("A string flag should fail.");

		assert!(err.to_string().contains("connection options"));
	}

	#[test]
	fn typed_options_are_encoded_before_the_envelope() {
		let connection = Connection::new("db", ConnectionStrategy::Auth0).with_options(
			ConnectionOptions::Auth0(Auth0Options {
				brute_force_protection: Some(true),
				..Default::default()
			}),
		);

		assert_eq!(
			serde_json::to_value(&connection).expect("Connection should encode."),
			serde_json::json!({
				"name": "db",
				"strategy": "auth0",
				"options": { "brute_force_protection": true },
			})
		);
	}
}
