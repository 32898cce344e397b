//! Confirmation workflow for destructive operations.
//!
//! A single gate holds at most one pending request. Destructive actions are
//! parked here as deferred closures and only run when the operator confirms;
//! cancelling drops the closure without running it. A new request replaces
//! any pending one wholesale.

use futures::future::BoxFuture;
use tokio::sync::Mutex;

type DeferredAction = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// A pending confirmation, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub title: String,
    pub description: String,
}

struct Pending {
    seq: u64,
    title: String,
    description: String,
    action: Option<DeferredAction>,
}

#[derive(Default)]
struct GateState {
    seq: u64,
    pending: Option<Pending>,
}

/// The console's single confirmation slot.
#[derive(Default)]
pub struct ConfirmationGate {
    state: Mutex<GateState>,
}

impl ConfirmationGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks `action` behind a confirmation prompt, replacing any pending
    /// request.
    pub async fn request(&self, title: &str, description: &str, action: DeferredAction) {
        let mut state = self.state.lock().await;
        state.seq += 1;
        state.pending = Some(Pending {
            seq: state.seq,
            title: title.to_string(),
            description: description.to_string(),
            action: Some(action),
        });
    }

    /// The prompt currently awaiting a decision, if any.
    pub async fn pending(&self) -> Option<PendingConfirmation> {
        self.state.lock().await.pending.as_ref().map(|p| PendingConfirmation {
            title: p.title.clone(),
            description: p.description.clone(),
        })
    }

    /// Runs the pending action.
    ///
    /// The gate stays open while the action runs and closes afterwards,
    /// unless a new request arrived in the meantime (that one is kept). A
    /// second confirm for the same request finds no action and does nothing.
    pub async fn confirm(&self) {
        let (seq, action) = {
            let mut state = self.state.lock().await;
            match state.pending.as_mut() {
                Some(p) => (p.seq, p.action.take()),
                None => return,
            }
        };
        let Some(action) = action else { return };

        action().await;

        let mut state = self.state.lock().await;
        if state.pending.as_ref().is_some_and(|p| p.seq == seq) {
            state.pending = None;
        }
    }

    /// Dismisses the pending request without running its action.
    pub async fn cancel(&self) {
        self.state.lock().await.pending = None;
    }
}
