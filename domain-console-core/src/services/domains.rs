//! Domain list and creation service.
//!
//! The domain list is global, not scoped to the active selection.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use domain_console_client::{Domain, NewDomain};

use crate::error::{CoreError, CoreResult};
use crate::services::{PanelState, ServiceContext};
use crate::validation::{validate_new_domain, Validation};

const CREATE_FALLBACK: &str = "Failed to create domain. Please try again.";
const LOAD_FALLBACK: &str = "Failed to load domains.";

/// Manages the set of selectable domains.
pub struct DomainsService {
    ctx: Arc<ServiceContext>,
    state: RwLock<PanelState<Vec<Domain>>>,
    form_errors: RwLock<BTreeMap<String, String>>,
}

impl DomainsService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            state: RwLock::new(PanelState::Empty),
            form_errors: RwLock::new(BTreeMap::new()),
        }
    }

    /// Current list state snapshot.
    pub async fn state(&self) -> PanelState<Vec<Domain>> {
        self.state.read().await.clone()
    }

    /// Field-level errors from the last rejected draft.
    pub async fn form_errors(&self) -> BTreeMap<String, String> {
        self.form_errors.read().await.clone()
    }

    /// Fetches the domain list. A load failure is reported once and flips
    /// the list to `Error`.
    pub async fn load(&self) -> CoreResult<()> {
        *self.state.write().await = PanelState::Loading;
        match self.ctx.api.list_domains().await {
            Ok(domains) => {
                *self.state.write().await = PanelState::Ready(domains);
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                let message = self.ctx.report_failure(&err, LOAD_FALLBACK);
                *self.state.write().await = PanelState::Error(message);
                Err(err)
            }
        }
    }

    /// Validates and submits a domain creation draft, then reloads the
    /// list so the new domain appears in it.
    pub async fn create(&self, draft: &NewDomain) -> CoreResult<Domain> {
        if let Validation::Invalid { field_errors } = validate_new_domain(draft) {
            *self.form_errors.write().await = field_errors.clone();
            return Err(CoreError::Validation { field_errors });
        }
        self.form_errors.write().await.clear();

        match self.ctx.api.create_domain(draft).await {
            Ok(domain) => {
                // read-after-write; a re-list failure flips the list to
                // Error but does not change the create's outcome
                match self.ctx.api.list_domains().await {
                    Ok(domains) => {
                        *self.state.write().await = PanelState::Ready(domains);
                    }
                    Err(e) => {
                        let err = CoreError::from(e);
                        log::warn!("Domain re-list failed: {err}");
                        *self.state.write().await =
                            PanelState::Error(err.display_message(LOAD_FALLBACK));
                    }
                }
                self.ctx.report_success("Domain created successfully");
                Ok(domain)
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.ctx.report_failure(&err, CREATE_FALLBACK);
                Err(err)
            }
        }
    }
}
