//! reqwest-backed implementation of [`AdminApi`].

use async_trait::async_trait;
use url::Url;

use crate::error::{ApiError, Result};
use crate::http;
use crate::traits::AdminApi;
use crate::types::{
    Application, ApplicationList, Domain, DomainList, IdentityProvider, IdentityProviderList,
    LogoUpload, NewApplication, NewDomain, NewIdentityProvider, StateUpdate, ThemeConfig,
};

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "DOMAIN_CONSOLE_API_URL";

/// Default backend base URL when [`BASE_URL_ENV`] is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const API_PREFIX: &str = "/api/v1";

/// REST client for the identity backend's admin API.
pub struct RestAdminApi {
    client: reqwest::Client,
    base_url: String,
}

impl RestAdminApi {
    /// Creates a client against the given base URL (scheme + host + port,
    /// without the `/api/v1` prefix).
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::Serialization {
            detail: format!("Invalid base URL '{base_url}': {e}"),
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from `DOMAIN_CONSOLE_API_URL`, falling back to
    /// `http://localhost:8000`.
    pub fn from_env() -> Result<Self> {
        let base = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }
}

#[async_trait]
impl AdminApi for RestAdminApi {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        let path = "/domains";
        let body = http::execute(self.client.get(self.url(path)), "GET", path).await?;
        let list: DomainList = http::parse_json(&body, path)?;
        Ok(list.domains)
    }

    async fn create_domain(&self, req: &NewDomain) -> Result<Domain> {
        let path = "/domains";
        let body = http::execute(self.client.post(self.url(path)).json(req), "POST", path).await?;
        http::parse_json(&body, path)
    }

    async fn list_applications(&self, domain: &str) -> Result<Vec<Application>> {
        let path = format!("/domains/{domain}/clients");
        let body = http::execute(self.client.get(self.url(&path)), "GET", &path).await?;
        let list: ApplicationList = http::parse_json(&body, &path)?;
        Ok(list.clients)
    }

    async fn create_application(&self, domain: &str, req: &NewApplication) -> Result<Application> {
        let path = format!("/domains/{domain}/clients");
        let body =
            http::execute(self.client.post(self.url(&path)).json(req), "POST", &path).await?;
        http::parse_json(&body, &path)
    }

    async fn delete_application(&self, domain: &str, id: &str) -> Result<()> {
        let path = format!("/domains/{domain}/clients/{id}");
        http::execute(self.client.delete(self.url(&path)), "DELETE", &path).await?;
        Ok(())
    }

    async fn set_application_state(&self, domain: &str, id: &str, enabled: bool) -> Result<()> {
        let path = format!("/domains/{domain}/clients/{id}/state");
        http::execute(
            self.client
                .patch(self.url(&path))
                .json(&StateUpdate { enabled }),
            "PATCH",
            &path,
        )
        .await?;
        Ok(())
    }

    async fn list_identity_providers(&self, domain: &str) -> Result<Vec<IdentityProvider>> {
        let path = format!("/domains/{domain}/identity-providers");
        let body = http::execute(self.client.get(self.url(&path)), "GET", &path).await?;
        let list: IdentityProviderList = http::parse_json(&body, &path)?;
        Ok(list.providers)
    }

    async fn create_identity_provider(
        &self,
        domain: &str,
        req: &NewIdentityProvider,
    ) -> Result<IdentityProvider> {
        let path = format!("/domains/{domain}/identity-providers");
        let body =
            http::execute(self.client.post(self.url(&path)).json(req), "POST", &path).await?;
        http::parse_json(&body, &path)
    }

    async fn set_identity_provider_state(
        &self,
        domain: &str,
        alias: &str,
        enabled: bool,
    ) -> Result<()> {
        let path = format!("/domains/{domain}/identity-providers/{alias}/state");
        http::execute(
            self.client
                .patch(self.url(&path))
                .json(&StateUpdate { enabled }),
            "PATCH",
            &path,
        )
        .await?;
        Ok(())
    }

    async fn get_theme(&self, domain: &str) -> Result<ThemeConfig> {
        let path = format!("/domains/{domain}/theme");
        let body = http::execute(self.client.get(self.url(&path)), "GET", &path).await?;
        http::parse_json(&body, &path)
    }

    async fn put_theme(&self, domain: &str, theme: &ThemeConfig) -> Result<()> {
        let path = format!("/domains/{domain}/theme");
        http::execute(self.client.put(self.url(&path)).json(theme), "PUT", &path).await?;
        Ok(())
    }

    async fn upload_logo(
        &self,
        domain: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<LogoUpload> {
        let path = format!("/domains/{domain}/theme/logo");
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("logo", part);
        let body = http::execute(
            self.client.post(self.url(&path)).multipart(form),
            "POST",
            &path,
        )
        .await?;
        http::parse_json(&body, &path)
    }
}
