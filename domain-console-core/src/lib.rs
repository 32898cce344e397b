//! Domain console core library.
//!
//! Provides the backend-agnostic orchestration logic for an administrative
//! console managing isolated identity domains:
//! - domain selection with stale-response protection
//! - validation-gated resource mutations with read-after-write refetch
//! - per-panel view state (applications, identity providers, theme)
//! - confirmation workflow for destructive operations
//! - a single operator notification per operation outcome
//!
//! The hosting shell injects an [`AdminApi`](domain_console_client::AdminApi)
//! client and a [`Notifier`] sink; everything else lives here.

pub mod confirm;
pub mod console;
pub mod error;
pub mod notify;
pub mod selection;
pub mod services;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use confirm::{ConfirmationGate, PendingConfirmation};
pub use console::Console;
pub use error::{CoreError, CoreResult, GENERIC_FAILURE};
pub use notify::{LogNotifier, Notifier, Severity};
pub use selection::{DomainSelection, SelectionSnapshot};
pub use services::{
    ApplicationsService, DomainsService, IdentityProvidersService, PanelState, ServiceContext,
    ThemeService,
};
pub use validation::{
    validate_new_application, validate_new_domain, validate_new_identity_provider, Validation,
};
