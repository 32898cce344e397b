//! Test helpers.
//!
//! Provides an in-memory [`AdminApi`] double with per-operation error
//! injection and call counting.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use domain_console_client::{
    AdminApi, ApiError, Application, Domain, IdentityProvider, LogoUpload, NewApplication,
    NewDomain, NewIdentityProvider, Result, ThemeConfig,
};

use crate::console::Console;
use crate::notify::{Notifier, RecordingNotifier};

/// Builds a console over a fresh mock backend and recording notifier.
pub fn create_test_console() -> (
    std::sync::Arc<MockAdminApi>,
    std::sync::Arc<RecordingNotifier>,
    Console,
) {
    let api = std::sync::Arc::new(MockAdminApi::new());
    let notifier = std::sync::Arc::new(RecordingNotifier::new());
    let console = Console::new(
        std::sync::Arc::clone(&api) as std::sync::Arc<dyn AdminApi>,
        std::sync::Arc::clone(&notifier) as std::sync::Arc<dyn Notifier>,
    );
    (api, notifier, console)
}

/// In-memory backend double.
///
/// Behaves like the real backend for the happy paths: ids are assigned on
/// create, `enabled` defaults to true, and an unset theme reads back as the
/// default palette. `set_error` makes a named operation fail until cleared.
pub struct MockAdminApi {
    domains: RwLock<Vec<Domain>>,
    apps: RwLock<HashMap<String, Vec<Application>>>,
    providers: RwLock<HashMap<String, Vec<IdentityProvider>>>,
    themes: RwLock<HashMap<String, ThemeConfig>>,
    errors: RwLock<HashMap<String, ApiError>>,
    calls: RwLock<HashMap<String, usize>>,
    next_id: AtomicU64,
}

impl MockAdminApi {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(Vec::new()),
            apps: RwLock::new(HashMap::new()),
            providers: RwLock::new(HashMap::new()),
            themes: RwLock::new(HashMap::new()),
            errors: RwLock::new(HashMap::new()),
            calls: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn seed_domain(&self, name: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        #[allow(clippy::cast_possible_wrap)]
        self.domains.write().unwrap().push(Domain {
            id: id as i64,
            name: name.to_string(),
            display_name: name.to_string(),
            description: None,
        });
    }

    pub fn seed_application(&self, domain: &str, client_id: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.apps
            .write()
            .unwrap()
            .entry(domain.to_string())
            .or_default()
            .push(Application {
                id: format!("app-{id}"),
                client_id: client_id.to_string(),
                name: Some(client_id.to_string()),
                description: None,
                enabled: true,
                public_client: true,
                redirect_uris: Vec::new(),
                root_url: None,
                base_url: None,
                admin_url: None,
            });
    }

    /// Seeds a disabled provider, optionally with a display name.
    pub fn seed_identity_provider(&self, domain: &str, alias: &str, display_name: Option<&str>) {
        self.providers
            .write()
            .unwrap()
            .entry(domain.to_string())
            .or_default()
            .push(IdentityProvider {
                alias: alias.to_string(),
                display_name: display_name.map(ToString::to_string),
                provider_id: domain_console_client::ProviderKind::Saml,
                enabled: false,
                config: std::collections::BTreeMap::new(),
                internal_id: None,
                add_read_token_role_on_create: false,
                trust_email: false,
                store_token: false,
                first_broker_login_flow_alias: "first broker login".to_string(),
            });
    }

    /// Makes `op` fail with `err` until `clear_error` is called.
    pub fn set_error(&self, op: &str, err: ApiError) {
        self.errors.write().unwrap().insert(op.to_string(), err);
    }

    pub fn clear_error(&self, op: &str) {
        self.errors.write().unwrap().remove(op);
    }

    /// How many times `op` has been invoked.
    pub fn calls(&self, op: &str) -> usize {
        self.calls.read().unwrap().get(op).copied().unwrap_or(0)
    }

    /// The stored theme for `domain`, when one has been saved.
    pub fn theme(&self, domain: &str) -> Option<ThemeConfig> {
        self.themes.read().unwrap().get(domain).cloned()
    }

    fn enter(&self, op: &str) -> Result<()> {
        *self.calls.write().unwrap().entry(op.to_string()).or_insert(0) += 1;
        match self.errors.read().unwrap().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockAdminApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.enter("list_domains")?;
        Ok(self.domains.read().unwrap().clone())
    }

    async fn create_domain(&self, req: &NewDomain) -> Result<Domain> {
        self.enter("create_domain")?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        #[allow(clippy::cast_possible_wrap)]
        let domain = Domain {
            id: id as i64,
            name: req.domain_name.clone(),
            display_name: req.display_name.clone(),
            description: req.description.clone(),
        };
        self.domains.write().unwrap().push(domain.clone());
        Ok(domain)
    }

    async fn list_applications(&self, domain: &str) -> Result<Vec<Application>> {
        self.enter("list_applications")?;
        Ok(self
            .apps
            .read()
            .unwrap()
            .get(domain)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_application(&self, domain: &str, req: &NewApplication) -> Result<Application> {
        self.enter("create_application")?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let app = Application {
            id: format!("app-{id}"),
            client_id: req.client_id.clone(),
            name: Some(req.name.clone()),
            description: req.description.clone(),
            enabled: true,
            public_client: req.public_client,
            redirect_uris: req.redirect_uris.clone(),
            root_url: None,
            base_url: None,
            admin_url: None,
        };
        self.apps
            .write()
            .unwrap()
            .entry(domain.to_string())
            .or_default()
            .push(app.clone());
        Ok(app)
    }

    async fn delete_application(&self, domain: &str, id: &str) -> Result<()> {
        self.enter("delete_application")?;
        if let Some(apps) = self.apps.write().unwrap().get_mut(domain) {
            apps.retain(|a| a.id != id);
        }
        Ok(())
    }

    async fn set_application_state(&self, domain: &str, id: &str, enabled: bool) -> Result<()> {
        self.enter("set_application_state")?;
        if let Some(app) = self
            .apps
            .write()
            .unwrap()
            .get_mut(domain)
            .and_then(|apps| apps.iter_mut().find(|a| a.id == id))
        {
            app.enabled = enabled;
        }
        Ok(())
    }

    async fn list_identity_providers(&self, domain: &str) -> Result<Vec<IdentityProvider>> {
        self.enter("list_identity_providers")?;
        Ok(self
            .providers
            .read()
            .unwrap()
            .get(domain)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_identity_provider(
        &self,
        domain: &str,
        req: &NewIdentityProvider,
    ) -> Result<IdentityProvider> {
        self.enter("create_identity_provider")?;
        let provider = IdentityProvider {
            alias: req.alias.clone(),
            display_name: Some(req.display_name.clone()),
            provider_id: req.provider_id,
            enabled: true,
            config: req.config.clone(),
            internal_id: None,
            add_read_token_role_on_create: false,
            trust_email: false,
            store_token: false,
            first_broker_login_flow_alias: "first broker login".to_string(),
        };
        self.providers
            .write()
            .unwrap()
            .entry(domain.to_string())
            .or_default()
            .push(provider.clone());
        Ok(provider)
    }

    async fn set_identity_provider_state(
        &self,
        domain: &str,
        alias: &str,
        enabled: bool,
    ) -> Result<()> {
        self.enter("set_identity_provider_state")?;
        if let Some(provider) = self
            .providers
            .write()
            .unwrap()
            .get_mut(domain)
            .and_then(|providers| providers.iter_mut().find(|p| p.alias == alias))
        {
            provider.enabled = enabled;
        }
        Ok(())
    }

    async fn get_theme(&self, domain: &str) -> Result<ThemeConfig> {
        self.enter("get_theme")?;
        Ok(self
            .themes
            .read()
            .unwrap()
            .get(domain)
            .cloned()
            .unwrap_or_default())
    }

    async fn put_theme(&self, domain: &str, theme: &ThemeConfig) -> Result<()> {
        self.enter("put_theme")?;
        self.themes
            .write()
            .unwrap()
            .insert(domain.to_string(), theme.clone());
        Ok(())
    }

    async fn upload_logo(
        &self,
        domain: &str,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<LogoUpload> {
        self.enter("upload_logo")?;
        Ok(LogoUpload {
            url: format!("https://cdn.test/{domain}/{file_name}"),
        })
    }
}
