//! Console façade wiring the selection, panels, and confirmation gate
//! together.

use std::sync::Arc;

use domain_console_client::AdminApi;

use crate::confirm::ConfirmationGate;
use crate::notify::Notifier;
use crate::selection::SelectionSnapshot;
use crate::services::{
    applications, identity_providers, theme, ApplicationsService, DomainsService,
    IdentityProvidersService, ServiceContext, ThemeService,
};

/// The administrative console core.
///
/// Owns the single selected-domain slot; panels read it but only
/// [`select_domain`](Self::select_domain) writes it.
pub struct Console {
    ctx: Arc<ServiceContext>,
    domains: DomainsService,
    applications: Arc<ApplicationsService>,
    identity_providers: Arc<IdentityProvidersService>,
    theme: Arc<ThemeService>,
    confirm: ConfirmationGate,
}

impl Console {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>, notifier: Arc<dyn Notifier>) -> Self {
        let ctx = Arc::new(ServiceContext::new(api, notifier));
        Self {
            domains: DomainsService::new(Arc::clone(&ctx)),
            applications: Arc::new(ApplicationsService::new(Arc::clone(&ctx))),
            identity_providers: Arc::new(IdentityProvidersService::new(Arc::clone(&ctx))),
            theme: Arc::new(ThemeService::new(Arc::clone(&ctx))),
            confirm: ConfirmationGate::new(),
            ctx,
        }
    }

    #[must_use]
    pub fn domains(&self) -> &DomainsService {
        &self.domains
    }

    #[must_use]
    pub fn applications(&self) -> &ApplicationsService {
        &self.applications
    }

    #[must_use]
    pub fn identity_providers(&self) -> &IdentityProvidersService {
        &self.identity_providers
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeService {
        &self.theme
    }

    #[must_use]
    pub fn confirm(&self) -> &ConfirmationGate {
        &self.confirm
    }

    /// The currently selected domain, if any.
    pub async fn selected_domain(&self) -> Option<String> {
        self.ctx.selection.current_domain().await
    }

    /// Changes the active domain and reloads every dependent panel.
    ///
    /// Prior collections are discarded synchronously before any fetch, so
    /// no panel ever shows data for a previously selected domain.
    /// Re-selecting the current domain is a no-op. Each failing fetch is
    /// reported once; its panel keeps the error for display.
    pub async fn select_domain(&self, domain: Option<&str>) {
        let Some(snap) = self
            .ctx
            .selection
            .select(domain.map(ToString::to_string))
            .await
        else {
            return;
        };
        self.reload_panels(&snap).await;
    }

    /// Resets and reloads the panels for a selection snapshot. Every state
    /// write is guarded against the selection having moved on, so a
    /// superseded reload never clobbers the winner's panels.
    pub(crate) async fn reload_panels(&self, snap: &SelectionSnapshot) {
        if !self.ctx.selection.is_current(snap).await {
            return;
        }
        self.applications.reset().await;
        self.identity_providers.reset().await;
        self.theme.reset().await;

        if snap.domain.is_none() {
            return;
        }
        log::debug!("Selected domain changed, reloading panels");

        if !self.ctx.selection.is_current(snap).await {
            return;
        }
        self.applications.begin_loading().await;
        self.identity_providers.begin_loading().await;
        self.theme.begin_loading().await;

        if let Err(e) = self.applications.sync(snap).await {
            self.ctx.report_failure(&e, applications::LOAD_FALLBACK);
        }
        if let Err(e) = self.identity_providers.sync(snap).await {
            self.ctx.report_failure(&e, identity_providers::LOAD_FALLBACK);
        }
        if let Err(e) = self.theme.sync(snap).await {
            self.ctx.report_failure(&e, theme::LOAD_FALLBACK);
        }
    }

    /// Parks an application delete behind the confirmation gate. The
    /// delete itself handles its own errors and notification, so the
    /// deferred action swallows its result.
    pub async fn request_delete_application(&self, id: &str) {
        let applications = Arc::clone(&self.applications);
        let id = id.to_string();
        self.confirm
            .request(
                "Delete Application",
                "Are you sure you want to delete this application? This action cannot be undone.",
                Box::new(move || {
                    Box::pin(async move {
                        let _ = applications.delete(&id).await;
                    })
                }),
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::notify::Severity;
    use crate::services::PanelState;
    use crate::test_utils::create_test_console as console;
    use domain_console_client::ApiError;

    #[tokio::test]
    async fn selecting_a_domain_loads_all_panels() {
        let (api, _notifier, console) = console();
        api.seed_domain("acme");
        api.seed_application("acme", "web");

        console.select_domain(Some("acme")).await;

        let apps = console.applications().state().await;
        assert_eq!(apps.ready().expect("ready").len(), 1);
        assert!(console
            .identity_providers()
            .state()
            .await
            .ready()
            .expect("ready")
            .is_empty());
        assert!(console.theme().state().await.ready().is_some());
    }

    #[tokio::test]
    async fn switching_domains_never_leaks_collections() {
        let (api, _notifier, console) = console();
        api.seed_domain("acme");
        api.seed_domain("globex");
        api.seed_application("acme", "web");

        console.select_domain(Some("acme")).await;
        console.select_domain(Some("globex")).await;

        let apps = console.applications().state().await;
        assert!(apps.ready().expect("ready").is_empty());
        assert_eq!(console.selected_domain().await.as_deref(), Some("globex"));
    }

    #[tokio::test]
    async fn clearing_selection_empties_panels() {
        let (api, _notifier, console) = console();
        api.seed_domain("acme");
        console.select_domain(Some("acme")).await;

        console.select_domain(None).await;

        assert!(console.applications().state().await.is_empty());
        assert!(console.identity_providers().state().await.is_empty());
        assert!(console.theme().state().await.is_empty());
    }

    #[tokio::test]
    async fn reselecting_current_domain_does_not_refetch() {
        let (api, _notifier, console) = console();
        api.seed_domain("acme");
        console.select_domain(Some("acme")).await;
        let before = api.calls("list_applications");

        console.select_domain(Some("acme")).await;
        assert_eq!(api.calls("list_applications"), before);
    }

    #[tokio::test]
    async fn superseded_reload_never_touches_panels() {
        let (api, _notifier, console) = console();
        api.seed_domain("acme");
        api.seed_domain("globex");
        api.seed_application("globex", "portal");

        // a selection whose reload never ran, then a full switch away
        let stale = console
            .ctx
            .selection
            .select(Some("acme".to_string()))
            .await
            .expect("snapshot");
        console.select_domain(Some("globex")).await;
        let before = console.applications().state().await;
        assert_eq!(before.ready().expect("ready").len(), 1);

        console.reload_panels(&stale).await;

        assert_eq!(console.applications().state().await, before);
        assert!(console.theme().state().await.ready().is_some());
        assert_eq!(console.selected_domain().await.as_deref(), Some("globex"));
    }

    #[tokio::test]
    async fn panel_fetch_failure_is_reported_once() {
        let (api, notifier, console) = console();
        api.seed_domain("acme");
        api.set_error(
            "list_applications",
            ApiError::Backend {
                status: 502,
                detail: None,
            },
        );

        console.select_domain(Some("acme")).await;

        assert!(matches!(
            console.applications().state().await,
            PanelState::Error(_)
        ));
        let errors: Vec<_> = notifier
            .entries()
            .into_iter()
            .filter(|(severity, _)| *severity == Severity::Error)
            .collect();
        assert_eq!(
            errors,
            vec![(
                Severity::Error,
                applications::LOAD_FALLBACK.to_string()
            )]
        );
        // other panels still loaded
        assert!(console.theme().state().await.ready().is_some());
    }

    #[tokio::test]
    async fn confirmed_delete_runs_and_closes_gate() {
        let (api, notifier, console) = console();
        api.seed_domain("acme");
        api.seed_application("acme", "web");
        console.select_domain(Some("acme")).await;
        notifier.clear();

        let id = console.applications().state().await.ready().expect("ready")[0]
            .id
            .clone();
        console.request_delete_application(&id).await;
        assert!(console.confirm().pending().await.is_some());

        console.confirm().confirm().await;
        assert!(console.confirm().pending().await.is_none());
        assert!(console
            .applications()
            .state()
            .await
            .ready()
            .expect("ready")
            .is_empty());
        assert_eq!(
            notifier.entries(),
            vec![(
                Severity::Success,
                "Application deleted successfully".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn cancelled_delete_leaves_application_in_place() {
        let (api, notifier, console) = console();
        api.seed_domain("acme");
        api.seed_application("acme", "web");
        console.select_domain(Some("acme")).await;
        notifier.clear();

        let id = console.applications().state().await.ready().expect("ready")[0]
            .id
            .clone();
        console.request_delete_application(&id).await;
        console.confirm().cancel().await;

        assert_eq!(
            console
                .applications()
                .state()
                .await
                .ready()
                .expect("ready")
                .len(),
            1
        );
        assert!(notifier.entries().is_empty());
        assert_eq!(api.calls("delete_application"), 0);
    }
}
