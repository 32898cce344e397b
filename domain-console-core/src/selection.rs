//! Active domain selection with a monotonic epoch guard.
//!
//! Every selection change bumps an epoch counter. Fetches triggered by a
//! selection capture a [`SelectionSnapshot`] first and check it against the
//! live state before applying results, so a slow response for a previously
//! selected domain can never overwrite data for the current one.

use tokio::sync::RwLock;

/// The selection state captured when a fetch starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// The domain the fetch is scoped to, `None` for a cleared selection.
    pub domain: Option<String>,
    /// Epoch at capture time.
    pub epoch: u64,
}

#[derive(Debug, Default)]
struct SelectionState {
    domain: Option<String>,
    epoch: u64,
}

/// The console's single active-domain slot.
#[derive(Debug, Default)]
pub struct DomainSelection {
    state: RwLock<SelectionState>,
}

impl DomainSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the active domain.
    ///
    /// Returns the snapshot to scope follow-up fetches to, or `None` when
    /// the selection is unchanged (re-selecting the current domain is a
    /// no-op and must not trigger refetches).
    pub async fn select(&self, domain: Option<String>) -> Option<SelectionSnapshot> {
        let mut state = self.state.write().await;
        if state.domain == domain {
            return None;
        }
        state.domain = domain;
        state.epoch += 1;
        Some(SelectionSnapshot {
            domain: state.domain.clone(),
            epoch: state.epoch,
        })
    }

    /// The currently selected domain, if any.
    pub async fn current_domain(&self) -> Option<String> {
        self.state.read().await.domain.clone()
    }

    /// Snapshot of the live selection, for scoping a fetch that was not
    /// triggered by a selection change (e.g. a post-mutation refetch).
    pub async fn snapshot(&self) -> SelectionSnapshot {
        let state = self.state.read().await;
        SelectionSnapshot {
            domain: state.domain.clone(),
            epoch: state.epoch,
        }
    }

    /// Whether `snap` still describes the live selection. Results scoped to
    /// a stale snapshot must be discarded without touching panel state.
    pub async fn is_current(&self, snap: &SelectionSnapshot) -> bool {
        let state = self.state.read().await;
        state.epoch == snap.epoch && state.domain == snap.domain
    }
}
