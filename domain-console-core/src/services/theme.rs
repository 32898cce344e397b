//! Theme panel service.
//!
//! The theme is a per-domain singleton: no delete, replace-whole-value
//! save only. The `Ready` payload doubles as the editable draft; logo
//! upload merges the new asset URL into the draft without persisting it,
//! so "uploaded" and "applied" stay distinct states.

use std::sync::Arc;

use tokio::sync::RwLock;

use domain_console_client::ThemeConfig;

use crate::error::{CoreError, CoreResult};
use crate::selection::SelectionSnapshot;
use crate::services::{PanelState, ServiceContext};

const SAVE_FALLBACK: &str = "Failed to save theme settings. Please try again.";
const UPLOAD_FALLBACK: &str = "Failed to upload logo. Please try again.";
pub(crate) const LOAD_FALLBACK: &str = "Failed to load theme settings.";

/// Manages the per-domain branding configuration.
pub struct ThemeService {
    ctx: Arc<ServiceContext>,
    state: RwLock<PanelState<ThemeConfig>>,
}

impl ThemeService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            state: RwLock::new(PanelState::Empty),
        }
    }

    /// Current panel state snapshot.
    pub async fn state(&self) -> PanelState<ThemeConfig> {
        self.state.read().await.clone()
    }

    pub(crate) async fn reset(&self) {
        *self.state.write().await = PanelState::Empty;
    }

    pub(crate) async fn begin_loading(&self) {
        *self.state.write().await = PanelState::Loading;
    }

    /// Fetches the theme for the snapshot's domain; stale results are
    /// discarded without touching state.
    pub(crate) async fn sync(&self, snap: &SelectionSnapshot) -> CoreResult<()> {
        let Some(domain) = snap.domain.as_deref() else {
            *self.state.write().await = PanelState::Empty;
            return Ok(());
        };

        let fetched = self.ctx.api.get_theme(domain).await;
        if !self.ctx.selection.is_current(snap).await {
            log::debug!("Discarding stale theme for {domain}");
            return Ok(());
        }

        match fetched {
            Ok(theme) => {
                *self.state.write().await = PanelState::Ready(theme);
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

    /// Replaces the in-memory draft. Local edit: no network, no
    /// notification. Fails when the panel is not ready.
    pub async fn update_draft(&self, theme: ThemeConfig) -> CoreResult<()> {
        self.edit_draft(|draft| *draft = theme).await
    }

    /// Sets the draft's color pair.
    pub async fn set_colors(&self, primary: &str, secondary: &str) -> CoreResult<()> {
        self.edit_draft(|draft| {
            draft.primary_color = primary.to_string();
            draft.secondary_color = secondary.to_string();
        })
        .await
    }

    /// Sets or clears the draft's login theme override.
    pub async fn set_login_theme(&self, login_theme: Option<String>) -> CoreResult<()> {
        self.edit_draft(|draft| draft.login_theme = login_theme).await
    }

    async fn edit_draft(&self, apply: impl FnOnce(&mut ThemeConfig)) -> CoreResult<()> {
        let mut state = self.state.write().await;
        match &mut *state {
            PanelState::Ready(draft) => {
                apply(draft);
                Ok(())
            }
            _ => Err(CoreError::ThemeNotLoaded),
        }
    }

    /// Persists the draft, then re-fetches so the panel reflects backend
    /// truth (the backend may normalize fields on write).
    pub async fn save(&self) -> CoreResult<()> {
        let outcome = async {
            let domain = self.ctx.require_domain().await?;
            let draft = match self.state.read().await.ready() {
                Some(theme) => theme.clone(),
                None => return Err(CoreError::ThemeNotLoaded),
            };
            self.ctx.api.put_theme(&domain, &draft).await?;

            let snap = self.ctx.selection.snapshot().await;
            if let Err(e) = self.sync(&snap).await {
                log::warn!("Theme refetch failed: {e}");
            }
            Ok(())
        }
        .await;

        match outcome {
            Ok(()) => {
                self.ctx.report_success("Theme settings saved successfully");
                Ok(())
            }
            Err(e) => {
                self.ctx.report_failure(&e, SAVE_FALLBACK);
                Err(e)
            }
        }
    }

    /// Uploads a logo asset and merges the returned URL into the draft.
    ///
    /// The URL is not applied to the domain's active theme until
    /// [`save`](Self::save) is invoked. The upload is scoped to the
    /// selection at issue time: if the selection moves on while the upload
    /// is in flight, the result is discarded without touching the new
    /// domain's draft and without notifying.
    pub async fn upload_logo(&self, file_name: &str, bytes: Vec<u8>) -> CoreResult<String> {
        let snap = self.ctx.selection.snapshot().await;
        let outcome = async {
            let domain = snap.domain.clone().ok_or(CoreError::NoDomainSelected)?;
            if self.state.read().await.ready().is_none() {
                return Err(CoreError::ThemeNotLoaded);
            }
            let upload = self.ctx.api.upload_logo(&domain, file_name, bytes).await?;
            Ok(upload.url)
        }
        .await;

        if !self.ctx.selection.is_current(&snap).await {
            log::debug!("Discarding logo upload for a superseded selection");
            return outcome;
        }

        match outcome {
            Ok(url) => {
                let mut state = self.state.write().await;
                if let PanelState::Ready(draft) = &mut *state {
                    draft.logo_url = Some(url.clone());
                }
                drop(state);
                self.ctx.report_success("Logo uploaded successfully");
                Ok(url)
            }
            Err(e) => {
                self.ctx.report_failure(&e, UPLOAD_FALLBACK);
                Err(e)
            }
        }
    }
}
