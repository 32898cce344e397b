//! Applications panel service.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use domain_console_client::{Application, NewApplication};

use crate::error::{CoreError, CoreResult};
use crate::selection::SelectionSnapshot;
use crate::services::{PanelState, ServiceContext};
use crate::validation::{validate_new_application, Validation};

const ADD_FALLBACK: &str = "Failed to add application. Please try again.";
const DELETE_FALLBACK: &str = "Failed to delete application. Please try again.";
const TOGGLE_FALLBACK: &str = "Failed to update application state. Please try again.";
pub(crate) const LOAD_FALLBACK: &str = "Failed to load applications.";

/// Manages the per-domain OAuth/OIDC client collection.
pub struct ApplicationsService {
    ctx: Arc<ServiceContext>,
    state: RwLock<PanelState<Vec<Application>>>,
    form_errors: RwLock<BTreeMap<String, String>>,
}

impl ApplicationsService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            state: RwLock::new(PanelState::Empty),
            form_errors: RwLock::new(BTreeMap::new()),
        }
    }

    /// Current panel state snapshot.
    pub async fn state(&self) -> PanelState<Vec<Application>> {
        self.state.read().await.clone()
    }

    /// Field-level errors from the last rejected draft.
    pub async fn form_errors(&self) -> BTreeMap<String, String> {
        self.form_errors.read().await.clone()
    }

    /// Discards the collection and any form errors. Called synchronously
    /// when the selection changes, before any fetch.
    pub(crate) async fn reset(&self) {
        *self.state.write().await = PanelState::Empty;
        self.form_errors.write().await.clear();
    }

    pub(crate) async fn begin_loading(&self) {
        *self.state.write().await = PanelState::Loading;
    }

    /// Fetches the collection for the snapshot's domain and applies it,
    /// unless the selection has moved on (stale results are discarded
    /// without touching state).
    pub(crate) async fn sync(&self, snap: &SelectionSnapshot) -> CoreResult<()> {
        let Some(domain) = snap.domain.as_deref() else {
            *self.state.write().await = PanelState::Empty;
            return Ok(());
        };

        let fetched = self.ctx.api.list_applications(domain).await;
        if !self.ctx.selection.is_current(snap).await {
            log::debug!("Discarding stale application list for {domain}");
            return Ok(());
        }

        match fetched {
            Ok(apps) => {
                *self.state.write().await = PanelState::Ready(apps);
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

    /// Re-fetches after a mutation so the panel reflects backend truth. A
    /// refetch failure flips the panel to `Error` but does not change the
    /// mutation's outcome.
    async fn refresh(&self) {
        let snap = self.ctx.selection.snapshot().await;
        if let Err(e) = self.sync(&snap).await {
            log::warn!("Application refetch failed: {e}");
        }
    }

    /// Validates and submits an application draft.
    ///
    /// On validation failure the draft never reaches the network; the field
    /// errors are retained for the form and no notification is emitted.
    pub async fn create(&self, draft: &NewApplication) -> CoreResult<()> {
        if let Validation::Invalid { field_errors } = validate_new_application(draft) {
            *self.form_errors.write().await = field_errors.clone();
            return Err(CoreError::Validation { field_errors });
        }
        self.form_errors.write().await.clear();

        match self.submit_create(draft).await {
            Ok(()) => {
                self.ctx.report_success("Application added successfully");
                Ok(())
            }
            Err(e) => {
                self.ctx.report_failure(&e, ADD_FALLBACK);
                Err(e)
            }
        }
    }

    async fn submit_create(&self, draft: &NewApplication) -> CoreResult<()> {
        let domain = self.ctx.require_domain().await?;
        self.ctx.api.create_application(&domain, draft).await?;
        self.refresh().await;
        Ok(())
    }

    /// Deletes an application by backend id.
    ///
    /// Expected to run behind the confirmation gate; the gate does not
    /// handle errors, so failure reporting happens here.
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        let outcome = async {
            let domain = self.ctx.require_domain().await?;
            self.ctx.api.delete_application(&domain, id).await?;
            self.refresh().await;
            Ok(())
        }
        .await;

        match outcome {
            Ok(()) => {
                self.ctx.report_success("Application deleted successfully");
                Ok(())
            }
            Err(e) => {
                self.ctx.report_failure(&e, DELETE_FALLBACK);
                Err(e)
            }
        }
    }

    /// Enables or disables an application. No validation applies.
    pub async fn set_enabled(&self, id: &str, enabled: bool) -> CoreResult<()> {
        let outcome = async {
            let domain = self.ctx.require_domain().await?;
            self.ctx
                .api
                .set_application_state(&domain, id, enabled)
                .await?;
            self.refresh().await;
            Ok(())
        }
        .await;

        match outcome {
            Ok(()) => {
                let verb = if enabled { "enabled" } else { "disabled" };
                self.ctx
                    .report_success(&format!("Application {verb} successfully"));
                Ok(())
            }
            Err(e) => {
                self.ctx.report_failure(&e, TOGGLE_FALLBACK);
                Err(e)
            }
        }
    }
}
