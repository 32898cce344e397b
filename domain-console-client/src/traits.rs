use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Application, Domain, IdentityProvider, LogoUpload, NewApplication, NewDomain,
    NewIdentityProvider, ThemeConfig,
};

/// The backend's admin REST surface, one method per resource operation.
///
/// Calls are not deduplicated and never retried here; concurrent identical
/// requests are both sent and completion order is not guaranteed. Every
/// failure is normalized into [`ApiError`](crate::ApiError).
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /domains`
    async fn list_domains(&self) -> Result<Vec<Domain>>;

    /// `POST /domains`
    async fn create_domain(&self, req: &NewDomain) -> Result<Domain>;

    /// `GET /domains/{d}/clients`
    async fn list_applications(&self, domain: &str) -> Result<Vec<Application>>;

    /// `POST /domains/{d}/clients`
    async fn create_application(&self, domain: &str, req: &NewApplication) -> Result<Application>;

    /// `DELETE /domains/{d}/clients/{id}`
    async fn delete_application(&self, domain: &str, id: &str) -> Result<()>;

    /// `PATCH /domains/{d}/clients/{id}/state`
    async fn set_application_state(&self, domain: &str, id: &str, enabled: bool) -> Result<()>;

    /// `GET /domains/{d}/identity-providers`
    async fn list_identity_providers(&self, domain: &str) -> Result<Vec<IdentityProvider>>;

    /// `POST /domains/{d}/identity-providers`
    async fn create_identity_provider(
        &self,
        domain: &str,
        req: &NewIdentityProvider,
    ) -> Result<IdentityProvider>;

    /// `PATCH /domains/{d}/identity-providers/{alias}/state`
    async fn set_identity_provider_state(
        &self,
        domain: &str,
        alias: &str,
        enabled: bool,
    ) -> Result<()>;

    /// `GET /domains/{d}/theme`
    async fn get_theme(&self, domain: &str) -> Result<ThemeConfig>;

    /// `PUT /domains/{d}/theme`
    async fn put_theme(&self, domain: &str, theme: &ThemeConfig) -> Result<()>;

    /// `POST /domains/{d}/theme/logo` (multipart upload)
    async fn upload_logo(
        &self,
        domain: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<LogoUpload>;
}
