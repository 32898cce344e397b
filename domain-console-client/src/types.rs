//! Wire types for the identity backend's admin REST surface.
//!
//! Field renames follow the backend exactly: domain endpoints speak
//! snake_case, client/provider/theme endpoints speak camelCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An isolated security realm managed by the backend.
///
/// `name` is the immutable slug used as the key in every resource-scoped
/// request path; `id` is a display/local key only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Domain {
    /// Local numeric key.
    pub id: i64,
    /// Immutable URL-safe slug, the stable external key.
    pub name: String,
    /// User-friendly display name.
    pub display_name: String,
    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for domain creation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewDomain {
    /// Realm slug, immutable once created.
    pub domain_name: String,
    /// User-friendly display name.
    pub display_name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An OAuth/OIDC client application registered within a domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Backend-assigned internal id, the resource key for delete/toggle.
    pub id: String,
    /// Client id slug, immutable once created.
    pub client_id: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the client may be used in authentication flows.
    pub enabled: bool,
    /// Public (no secret) vs confidential client.
    pub public_client: bool,
    /// Allowed redirect URIs after login.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    /// Default root URL for the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,
    /// Default base URL for relative links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// URL of the client's own admin console.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,
}

/// Draft form for application creation. Contains only operator-settable
/// fields; the backend assigns `id` and defaults `enabled`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    /// Client id slug.
    pub client_id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Public (no secret) vs confidential client.
    pub public_client: bool,
    /// Allowed redirect URIs.
    pub redirect_uris: Vec<String>,
}

/// Supported identity provider protocols/vendors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Github,
    Facebook,
    Microsoft,
    Saml,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Google => "google",
            Self::Github => "github",
            Self::Facebook => "facebook",
            Self::Microsoft => "microsoft",
            Self::Saml => "saml",
        };
        f.write_str(s)
    }
}

/// An external identity provider federated into a domain.
///
/// `alias` is the resource key within the domain; uniqueness is enforced by
/// the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    /// Provider alias slug, immutable once created.
    pub alias: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Protocol/vendor of the provider.
    pub provider_id: ProviderKind,
    /// Whether the provider is offered at login.
    pub enabled: bool,
    /// Provider-specific configuration (at minimum clientId/clientSecret).
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    /// Backend-internal id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<String>,
    /// Grant the read-token role to newly federated users.
    pub add_read_token_role_on_create: bool,
    /// Trust email addresses asserted by the provider.
    pub trust_email: bool,
    /// Store provider tokens after login.
    pub store_token: bool,
    /// Authentication flow applied on first broker login.
    pub first_broker_login_flow_alias: String,
}

/// Draft form for identity provider creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIdentityProvider {
    /// Protocol/vendor of the provider.
    pub provider_id: ProviderKind,
    /// Provider alias slug.
    pub alias: String,
    /// Display name.
    pub display_name: String,
    /// Provider-specific configuration; clientId/clientSecret required.
    pub config: BTreeMap<String, String>,
}

impl Default for NewIdentityProvider {
    fn default() -> Self {
        Self {
            provider_id: ProviderKind::Google,
            alias: String::new(),
            display_name: String::new(),
            config: BTreeMap::new(),
        }
    }
}

/// Per-domain branding settings. Singleton: no delete, replace-whole-value
/// update only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// URL of the uploaded logo asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Primary color, `#rrggbb`.
    pub primary_color: String,
    /// Secondary color, `#rrggbb`.
    pub secondary_color: String,
    /// Login theme name, when overridden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_theme: Option<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            logo_url: None,
            primary_color: "#3b82f6".to_string(),
            secondary_color: "#6b7280".to_string(),
            login_theme: None,
        }
    }
}

/// Result of a logo asset upload. The returned URL is not applied to the
/// domain's theme until a separate theme save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoUpload {
    /// URL of the stored asset.
    pub url: String,
}

/// PATCH body for the enable/disable endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StateUpdate {
    /// New enabled state.
    pub enabled: bool,
}

/// `GET /domains` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainList {
    pub domains: Vec<Domain>,
}

/// `GET /domains/{d}/clients` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationList {
    pub clients: Vec<Application>,
}

/// `GET /domains/{d}/identity-providers` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProviderList {
    pub providers: Vec<IdentityProvider>,
}
