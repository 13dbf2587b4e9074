//! Identity provider seam.
//!
//! The current identity is an explicit value obtained from a provider and
//! carried by [`crate::ClientContext`]; nothing reads it from ambient state.

use autolot_core::models::Identity;
use tokio::sync::watch;

/// Supplies the current authenticated identity and a subscription to
/// identity-change events.
pub trait IdentityProvider: Send + Sync {
    /// The identity at this instant, if signed in.
    fn current(&self) -> Option<Identity>;

    /// Subscribe to identity changes. The receiver observes the latest state
    /// after each sign-in or sign-out.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}

/// In-process identity provider backed by a watch channel.
pub struct LocalIdentityProvider {
    tx: watch::Sender<Option<Identity>>,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn signed_in(identity: Identity) -> Self {
        let (tx, _rx) = watch::channel(Some(identity));
        Self { tx }
    }

    pub fn sign_in(&self, identity: Identity) {
        self.tx.send_replace(Some(identity));
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn current(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }
}
