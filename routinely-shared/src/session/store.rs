/// In-memory session store
///
/// Maps opaque session tokens to session state. Tokens are random uuids;
/// absence of a valid token means "anonymous". Nothing is persisted, so a
/// restart logs everyone out.
///
/// # Example
///
/// ```
/// use routinely_shared::session::SessionStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = SessionStore::new();
///
/// let token = store.create(Some(42)).await;
/// assert_eq!(store.user_id(&token).await, Some(42));
///
/// store.clear(&token).await;
/// assert_eq!(store.user_id(&token).await, None);
/// # }
/// ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// State held for one session
#[derive(Debug, Default)]
struct SessionData {
    /// Logged-in user, `None` for a session that only carries a flash
    user_id: Option<i64>,

    /// Pending one-shot message, consumed on the next render
    flash: Option<String>,
}

/// Shared session store
///
/// Cloning is cheap; all clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl SessionStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session and returns its opaque token
    ///
    /// Pass `None` for an anonymous session (used to carry a flash message
    /// through a redirect before anyone is logged in).
    pub async fn create(&self, user_id: Option<i64>) -> String {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.inner.write().await;
        sessions.insert(
            token.clone(),
            SessionData {
                user_id,
                flash: None,
            },
        );
        token
    }

    /// Resolves a token to its logged-in user, if any
    pub async fn user_id(&self, token: &str) -> Option<i64> {
        let sessions = self.inner.read().await;
        sessions.get(token).and_then(|s| s.user_id)
    }

    /// Removes a session entirely
    ///
    /// Returns true if the token was live.
    pub async fn clear(&self, token: &str) -> bool {
        let mut sessions = self.inner.write().await;
        sessions.remove(token).is_some()
    }

    /// Stores a flash message on a live session
    ///
    /// Returns false if the token is unknown (caller creates a session
    /// first).
    pub async fn set_flash(&self, token: &str, message: impl Into<String>) -> bool {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(token) {
            Some(session) => {
                session.flash = Some(message.into());
                true
            }
            None => false,
        }
    }

    /// Takes the pending flash message, leaving none behind
    pub async fn take_flash(&self, token: &str) -> Option<String> {
        let mut sessions = self.inner.write().await;
        sessions.get_mut(token).and_then(|s| s.flash.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_resolve() {
        let store = SessionStore::new();
        let token = store.create(Some(7)).await;

        assert_eq!(store.user_id(&token).await, Some(7));
        assert_eq!(store.user_id("unknown-token").await, None);
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = SessionStore::new();
        let a = store.create(Some(1)).await;
        let b = store.create(Some(1)).await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_clear_logs_out() {
        let store = SessionStore::new();
        let token = store.create(Some(7)).await;

        assert!(store.clear(&token).await);
        assert_eq!(store.user_id(&token).await, None);
        assert!(!store.clear(&token).await);
    }

    #[tokio::test]
    async fn test_anonymous_session_has_no_user() {
        let store = SessionStore::new();
        let token = store.create(None).await;
        assert_eq!(store.user_id(&token).await, None);
    }

    #[tokio::test]
    async fn test_flash_is_one_shot() {
        let store = SessionStore::new();
        let token = store.create(None).await;

        assert!(store.set_flash(&token, "ERROR: invalid username").await);
        assert_eq!(
            store.take_flash(&token).await.as_deref(),
            Some("ERROR: invalid username")
        );
        assert_eq!(store.take_flash(&token).await, None);
    }

    #[tokio::test]
    async fn test_flash_requires_live_session() {
        let store = SessionStore::new();
        assert!(!store.set_flash("unknown-token", "msg").await);
    }
}
