//! Identity providers panel service.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use domain_console_client::{IdentityProvider, NewIdentityProvider};

use crate::error::{CoreError, CoreResult};
use crate::selection::SelectionSnapshot;
use crate::services::{PanelState, ServiceContext};
use crate::validation::{validate_new_identity_provider, Validation};

const ADD_FALLBACK: &str = "Failed to add provider. Please try again.";
const TOGGLE_FALLBACK: &str = "Failed to update provider state. Please try again.";
pub(crate) const LOAD_FALLBACK: &str = "Failed to load identity providers.";

/// Manages the per-domain federated identity provider collection.
pub struct IdentityProvidersService {
    ctx: Arc<ServiceContext>,
    state: RwLock<PanelState<Vec<IdentityProvider>>>,
    form_errors: RwLock<BTreeMap<String, String>>,
}

impl IdentityProvidersService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            state: RwLock::new(PanelState::Empty),
            form_errors: RwLock::new(BTreeMap::new()),
        }
    }

    /// Current panel state snapshot.
    pub async fn state(&self) -> PanelState<Vec<IdentityProvider>> {
        self.state.read().await.clone()
    }

    /// Field-level errors from the last rejected draft.
    pub async fn form_errors(&self) -> BTreeMap<String, String> {
        self.form_errors.read().await.clone()
    }

    pub(crate) async fn reset(&self) {
        *self.state.write().await = PanelState::Empty;
        self.form_errors.write().await.clear();
    }

    pub(crate) async fn begin_loading(&self) {
        *self.state.write().await = PanelState::Loading;
    }

    /// Fetches the collection for the snapshot's domain; stale results are
    /// discarded without touching state.
    pub(crate) async fn sync(&self, snap: &SelectionSnapshot) -> CoreResult<()> {
        let Some(domain) = snap.domain.as_deref() else {
            *self.state.write().await = PanelState::Empty;
            return Ok(());
        };

        let fetched = self.ctx.api.list_identity_providers(domain).await;
        if !self.ctx.selection.is_current(snap).await {
            log::debug!("Discarding stale provider list for {domain}");
            return Ok(());
        }

        match fetched {
            Ok(providers) => {
                *self.state.write().await = PanelState::Ready(providers);
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                *self.state.write().await =
                    PanelState::Error(err.display_message(LOAD_FALLBACK));
                Err(err)
            }
        }
    }

    async fn refresh(&self) {
        let snap = self.ctx.selection.snapshot().await;
        if let Err(e) = self.sync(&snap).await {
            log::warn!("Provider refetch failed: {e}");
        }
    }

    /// Validates and submits an identity provider draft.
    pub async fn create(&self, draft: &NewIdentityProvider) -> CoreResult<()> {
        if let Validation::Invalid { field_errors } = validate_new_identity_provider(draft) {
            *self.form_errors.write().await = field_errors.clone();
            return Err(CoreError::Validation { field_errors });
        }
        self.form_errors.write().await.clear();

        let outcome = async {
            let domain = self.ctx.require_domain().await?;
            self.ctx.api.create_identity_provider(&domain, draft).await?;
            self.refresh().await;
            Ok(())
        }
        .await;

        match outcome {
            Ok(()) => {
                self.ctx
                    .report_success("Identity provider added successfully");
                Ok(())
            }
            Err(e) => {
                self.ctx.report_failure(&e, ADD_FALLBACK);
                Err(e)
            }
        }
    }

    /// Enables or disables a provider by alias. No validation applies.
    pub async fn set_enabled(&self, alias: &str, enabled: bool) -> CoreResult<()> {
        let label = self.display_label(alias).await;

        let outcome = async {
            let domain = self.ctx.require_domain().await?;
            self.ctx
                .api
                .set_identity_provider_state(&domain, alias, enabled)
                .await?;
            self.refresh().await;
            Ok(())
        }
        .await;

        match outcome {
            Ok(()) => {
                let verb = if enabled { "enabled" } else { "disabled" };
                self.ctx.report_success(&format!("{label} has been {verb}"));
                Ok(())
            }
            Err(e) => {
                self.ctx.report_failure(&e, TOGGLE_FALLBACK);
                Err(e)
            }
        }
    }

    /// The name shown in notifications: display name when set, alias
    /// otherwise.
    async fn display_label(&self, alias: &str) -> String {
        self.state
            .read()
            .await
            .ready()
            .and_then(|providers| providers.iter().find(|p| p.alias == alias))
            .and_then(|p| p.display_name.clone())
            .unwrap_or_else(|| alias.to_string())
    }
}
