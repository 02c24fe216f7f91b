//! Shared session context with change notifications.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info, warn};

use larder_domain::{Credential, SessionEvent, SessionState};

use super::MemoryCredentialStore;
use crate::ports::CredentialStore;

const EVENT_CAPACITY: usize = 16;

/// The explicit session object injected into the pipeline and adapters.
///
/// Cloning is cheap; every clone observes the same credential. The in-memory
/// credential is authoritative: storage failures are logged and never undo a
/// transition.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

struct Inner {
    credential: RwLock<Option<Credential>>,
    store: Arc<dyn CredentialStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionContext {
    fn with_initial(store: Arc<dyn CredentialStore>, credential: Option<Credential>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                credential: RwLock::new(credential),
                store,
                events,
            }),
        }
    }

    /// Restores the session from persistent storage.
    ///
    /// A stored credential means the session starts authenticated. An
    /// unreadable store starts an anonymous session.
    pub async fn restore(store: Arc<dyn CredentialStore>) -> Self {
        let credential = match store.load().await {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "Failed to load stored credential, starting signed out");
                None
            }
        };
        if let Some(credential) = &credential {
            debug!(token = %credential, "Restored session credential");
        }
        Self::with_initial(store, credential)
    }

    /// Creates an anonymous session backed by a [`MemoryCredentialStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_initial(Arc::new(MemoryCredentialStore::new()), None)
    }

    /// Returns the current credential.
    pub async fn get(&self) -> Option<Credential> {
        self.inner.credential.read().await.clone()
    }

    /// Returns whether a credential is held.
    pub async fn state(&self) -> SessionState {
        if self.inner.credential.read().await.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Returns true if a credential is held.
    pub async fn is_authenticated(&self) -> bool {
        self.state().await == SessionState::Authenticated
    }

    /// Subscribes to session transitions.
    ///
    /// Only transitions after the call are delivered.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Stores a credential after a successful login.
    pub(crate) async fn set(&self, credential: Credential) {
        let mut current = self.inner.credential.write().await;
        if let Err(e) = self.inner.store.save(&credential).await {
            warn!(error = %e, "Failed to persist credential");
        }
        info!(token = %credential, "Signed in");
        *current = Some(credential);
        drop(current);
        self.emit(SessionEvent::SignedIn);
    }

    /// Removes the credential on explicit logout.
    ///
    /// Returns false if the session was already anonymous.
    pub(crate) async fn clear(&self) -> bool {
        if !self.take().await {
            return false;
        }
        info!("Signed out");
        self.emit(SessionEvent::SignedOut);
        true
    }

    /// Terminates the session after the server rejected the credential.
    ///
    /// Only the caller that actually removed a credential emits
    /// [`SessionEvent::Expired`]; later calls return false.
    pub(crate) async fn expire(&self, redirect_to: &str) -> bool {
        if !self.take().await {
            debug!("Session already anonymous, ignoring expiry");
            return false;
        }
        warn!(redirect_to, "Session expired");
        self.emit(SessionEvent::Expired {
            redirect_to: redirect_to.to_string(),
        });
        true
    }

    async fn take(&self) -> bool {
        let mut current = self.inner.credential.write().await;
        if current.take().is_none() {
            return false;
        }
        if let Err(e) = self.inner.store.remove().await {
            warn!(error = %e, "Failed to remove stored credential");
        }
        true
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is not an error.
        let _ = self.inner.events.send(event);
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("subscribers", &self.inner.events.receiver_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::CredentialStoreError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct BrokenStore;

    #[async_trait]
    impl CredentialStore for BrokenStore {
        async fn load(&self) -> Result<Option<Credential>, CredentialStoreError> {
            Err(CredentialStoreError::Serialization("corrupt".into()))
        }

        async fn save(&self, _: &Credential) -> Result<(), CredentialStoreError> {
            Err(CredentialStoreError::Serialization("read-only".into()))
        }

        async fn remove(&self) -> Result<(), CredentialStoreError> {
            Err(CredentialStoreError::Serialization("read-only".into()))
        }
    }

    #[tokio::test]
    async fn test_restore_from_store() {
        let store = MemoryCredentialStore::with_credential(Credential::new("stored-token"));
        let session = SessionContext::restore(Arc::new(store)).await;

        assert_eq!(session.state().await, SessionState::Authenticated);
        assert_eq!(session.get().await, Some(Credential::new("stored-token")));
    }

    #[tokio::test]
    async fn test_set_persists_and_notifies() {
        let store = MemoryCredentialStore::new();
        let session = SessionContext::restore(Arc::new(store.clone())).await;
        let mut events = session.subscribe();

        session.set(Credential::new("fresh-token")).await;

        assert!(session.is_authenticated().await);
        assert_eq!(store.peek(), Some(Credential::new("fresh-token")));
        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedIn);
    }

    #[tokio::test]
    async fn test_clear_removes_from_store() {
        let store = MemoryCredentialStore::with_credential(Credential::new("stored-token"));
        let session = SessionContext::restore(Arc::new(store.clone())).await;
        let mut events = session.subscribe();

        assert!(session.clear().await);
        assert!(!session.clear().await);

        assert_eq!(store.peek(), None);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedOut);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_expire_emits_once() {
        let session = SessionContext::in_memory();
        session.set(Credential::new("token")).await;
        let mut events = session.subscribe();

        assert!(session.expire("/login").await);
        assert!(!session.expire("/login").await);

        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::Expired {
                redirect_to: "/login".to_string()
            }
        );
        assert!(events.try_recv().is_err());
        assert_eq!(session.state().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_concurrent_expiry_emits_once() {
        let session = SessionContext::in_memory();
        session.set(Credential::new("token")).await;
        let mut events = session.subscribe();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = session.clone();
                tokio::spawn(async move { session.expire("/login").await })
            })
            .collect();
        let mut expired = 0;
        for handle in handles {
            if handle.await.unwrap() {
                expired += 1;
            }
        }

        assert_eq!(expired, 1);
        assert!(events.recv().await.is_ok());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_storage_failures_do_not_escape() {
        let session = SessionContext::restore(Arc::new(BrokenStore)).await;
        assert!(!session.is_authenticated().await);

        session.set(Credential::new("token")).await;
        assert!(session.is_authenticated().await);

        assert!(session.expire("/login").await);
        assert!(!session.is_authenticated().await);
    }
}
