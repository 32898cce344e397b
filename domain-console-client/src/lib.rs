//! Typed REST client for the domain console's identity backend.
//!
//! The backend is an opaque REST service managing isolated security realms
//! ("domains") with per-domain OAuth/OIDC clients, federated identity
//! providers, and branding settings. This crate owns the wire types, the HTTP
//! plumbing, and the uniform error normalization; orchestration lives in
//! `domain-console-core`.

mod http;

pub mod error;
pub mod rest;
pub mod traits;
pub mod types;

pub use error::{ApiError, Result};
pub use rest::RestAdminApi;
pub use traits::AdminApi;
pub use types::{
    Application, ApplicationList, Domain, DomainList, IdentityProvider, IdentityProviderList,
    LogoUpload, NewApplication, NewDomain, NewIdentityProvider, ProviderKind, StateUpdate,
    ThemeConfig,
};
