//! Draft form validation.
//!
//! Pure, synchronous, side-effect-free checks applied before any create
//! request is sent. A failing draft never reaches the network.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use domain_console_client::{NewApplication, NewDomain, NewIdentityProvider};

use crate::error::{CoreError, CoreResult};

/// Shared slug pattern for client ids, provider aliases, and domain names.
#[allow(clippy::expect_used)]
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("slug pattern compiles"));

/// Outcome of validating a draft form.
///
/// "No errors" is a first-class state: an empty error mapping is never
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The draft satisfies every rule and may be submitted.
    Valid,
    /// The draft is rejected; one message per offending field.
    Invalid {
        /// Field name -> operator-facing error message.
        field_errors: BTreeMap<String, String>,
    },
}

impl Validation {
    fn from_errors(field_errors: BTreeMap<String, String>) -> Self {
        if field_errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid { field_errors }
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Converts into a `CoreResult`, mapping `Invalid` to
    /// [`CoreError::Validation`].
    pub fn into_result(self) -> CoreResult<()> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid { field_errors } => Err(CoreError::Validation { field_errors }),
        }
    }
}

fn is_slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}

/// Validates an application draft.
///
/// Rules: `clientId` required and slug-shaped; `name` required; every
/// redirect URI non-empty and starting with `http://` or `https://`.
#[must_use]
pub fn validate_new_application(draft: &NewApplication) -> Validation {
    let mut errors = BTreeMap::new();

    if draft.client_id.is_empty() {
        errors.insert("clientId".to_string(), "Client ID is required".to_string());
    } else if !is_slug(&draft.client_id) {
        errors.insert(
            "clientId".to_string(),
            "Client ID can only contain lowercase letters, numbers, and hyphens".to_string(),
        );
    }

    if draft.name.is_empty() {
        errors.insert("name".to_string(), "Display name is required".to_string());
    }

    if draft.redirect_uris.iter().any(String::is_empty) {
        errors.insert(
            "redirectUris".to_string(),
            "All redirect URIs must be filled out".to_string(),
        );
    } else if draft
        .redirect_uris
        .iter()
        .any(|uri| !uri.starts_with("http://") && !uri.starts_with("https://"))
    {
        errors.insert(
            "redirectUris".to_string(),
            "All redirect URIs must start with http:// or https://".to_string(),
        );
    }

    Validation::from_errors(errors)
}

/// Validates an identity provider draft.
///
/// Rules: `alias` required and slug-shaped; `displayName` required;
/// `config.clientId` and `config.clientSecret` non-empty.
#[must_use]
pub fn validate_new_identity_provider(draft: &NewIdentityProvider) -> Validation {
    let mut errors = BTreeMap::new();

    if draft.alias.is_empty() {
        errors.insert("alias".to_string(), "Alias is required".to_string());
    } else if !is_slug(&draft.alias) {
        errors.insert(
            "alias".to_string(),
            "Alias can only contain lowercase letters, numbers, and hyphens".to_string(),
        );
    }

    if draft.display_name.is_empty() {
        errors.insert(
            "displayName".to_string(),
            "Display name is required".to_string(),
        );
    }

    if draft.config.get("clientId").is_none_or(String::is_empty) {
        errors.insert("clientId".to_string(), "Client ID is required".to_string());
    }

    if draft.config.get("clientSecret").is_none_or(String::is_empty) {
        errors.insert(
            "clientSecret".to_string(),
            "Client Secret is required".to_string(),
        );
    }

    Validation::from_errors(errors)
}

/// Validates a domain creation draft.
///
/// Rules: `domainName` required and slug-shaped; `displayName` required.
#[must_use]
pub fn validate_new_domain(draft: &NewDomain) -> Validation {
    let mut errors = BTreeMap::new();

    if draft.domain_name.is_empty() {
        errors.insert(
            "domainName".to_string(),
            "Domain name is required".to_string(),
        );
    } else if !is_slug(&draft.domain_name) {
        errors.insert(
            "domainName".to_string(),
            "Domain name can only contain lowercase letters, numbers, and hyphens".to_string(),
        );
    }

    if draft.display_name.is_empty() {
        errors.insert(
            "displayName".to_string(),
            "Display name is required".to_string(),
        );
    }

    Validation::from_errors(errors)
}
