//! Panel orchestration services.

pub(crate) mod applications;
pub(crate) mod domains;
pub(crate) mod identity_providers;
pub(crate) mod theme;

pub use applications::ApplicationsService;
pub use domains::DomainsService;
pub use identity_providers::IdentityProvidersService;
pub use theme::ThemeService;

use std::sync::Arc;

use domain_console_client::AdminApi;

use crate::error::{CoreError, CoreResult};
use crate::notify::{Notifier, Severity};
use crate::selection::DomainSelection;

/// Per-panel view state, keyed by the selected domain.
///
/// A panel never shows data for a domain other than the selected one:
/// selection changes reset it to `Empty` synchronously, before any fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState<T> {
    /// No domain selected.
    #[default]
    Empty,
    /// Fetch in flight; prior data already discarded.
    Loading,
    /// Collection/singleton populated from the backend.
    Ready(T),
    /// Fetch failed; holds the operator-facing message.
    Error(String),
}

impl<T> PanelState<T> {
    /// The payload when ready, `None` otherwise.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Service context holding the dependencies every panel service needs.
///
/// The hosting shell creates this once and injects its backend client and
/// notification sink.
pub struct ServiceContext {
    /// Backend admin API client.
    pub api: Arc<dyn AdminApi>,
    /// Operator notification sink.
    pub notifier: Arc<dyn Notifier>,
    /// Single-writer active domain slot, read by every panel.
    pub selection: Arc<DomainSelection>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            selection: Arc::new(DomainSelection::new()),
        }
    }

    /// The selected domain, or [`CoreError::NoDomainSelected`].
    pub async fn require_domain(&self) -> CoreResult<String> {
        self.selection
            .current_domain()
            .await
            .ok_or(CoreError::NoDomainSelected)
    }

    /// Emits the single success notification for a completed mutation.
    pub fn report_success(&self, message: &str) {
        log::debug!("{message}");
        self.notifier.notify(Severity::Success, message);
    }

    /// Classifies a failure into the log, emits its single error
    /// notification, and returns the operator-facing message.
    pub fn report_failure(&self, err: &CoreError, fallback: &str) -> String {
        if err.is_expected() {
            log::warn!("{err}");
        } else {
            log::error!("{err}");
        }
        let message = err.display_message(fallback);
        self.notifier.notify(Severity::Error, &message);
        message
    }
}
