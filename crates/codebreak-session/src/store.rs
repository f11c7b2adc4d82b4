//! Session storage.
//!
//! The engine never touches a `HashMap` directly. It talks to a
//! [`SessionStore`], which promises one thing above all: [`update`]
//! runs its closure with exclusive access to one session, and keeps the
//! result only if the closure succeeds.
//!
//! [`update`]: SessionStore::update

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use codebreak_protocol::SessionId;
use tokio::sync::{Mutex, RwLock};

use crate::{Session, SessionError};

/// Key-value storage for sessions with atomic per-session updates.
///
/// # Trait bounds
///
/// - `Send + Sync` → one store is shared by every task calling the engine.
/// - `'static` → the store lives as long as the engine.
///
/// Methods return `Send` futures so engine calls can run inside
/// `tokio::spawn`. Implementations can simply write `async fn`.
pub trait SessionStore: Send + Sync + 'static {
    /// Inserts `session` unless its id is taken. Returns `true` if it was
    /// inserted. Check and insert are one atomic step.
    fn insert_new(&self, session: Session) -> impl Future<Output = bool> + Send;

    /// Returns a copy of the session, if any.
    fn get(
        &self,
        id: &SessionId,
    ) -> impl Future<Output = Option<Session>> + Send;

    /// Runs `f` against the session under its lock.
    ///
    /// `f` works on a copy; the copy replaces the stored session only
    /// when `f` returns `Ok`. Updates to the same id never interleave.
    ///
    /// # Errors
    /// [`SessionError::NotFound`] for an unknown id, otherwise whatever
    /// `f` returns.
    fn update<T, F>(
        &self,
        id: &SessionId,
        f: F,
    ) -> impl Future<Output = Result<T, SessionError>> + Send
    where
        T: Send,
        F: FnOnce(&mut Session) -> Result<T, SessionError> + Send;

    fn contains(&self, id: &SessionId) -> impl Future<Output = bool> + Send;

    /// Removes and returns the session.
    fn remove(
        &self,
        id: &SessionId,
    ) -> impl Future<Output = Option<Session>> + Send;

    /// Number of stored sessions.
    fn len(&self) -> impl Future<Output = usize> + Send;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process [`SessionStore`].
///
/// Two levels of locking:
///
/// ```text
/// RwLock<HashMap<id, handle>>     ← held just long enough to find/insert a handle
///            │
///            ▼
///   Arc<Mutex<Session>>           ← one per session; serializes its updates
/// ```
///
/// Work on one session never blocks work on another, and the index lock
/// is never held while a session closure runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every finished session and returns their ids.
    ///
    /// The engine never calls this; retention is up to whoever runs it.
    ///
    /// Session locks are taken one at a time with the index unlocked.
    /// `Finished` is terminal, so a session seen finished is still
    /// finished when it is removed.
    pub async fn purge_finished(&self) -> Vec<SessionId> {
        let handles: Vec<(SessionId, Arc<Mutex<Session>>)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, handle)| (id.clone(), Arc::clone(handle)))
            .collect();

        let mut finished = Vec::new();
        for (id, handle) in handles {
            if handle.lock().await.phase().is_finished() {
                finished.push(id);
            }
        }

        if !finished.is_empty() {
            let mut sessions = self.sessions.write().await;
            for id in &finished {
                sessions.remove(id);
            }
            tracing::info!(count = finished.len(), "purged finished sessions");
        }
        finished
    }

    /// Clones the handle for `id` and releases the index lock.
    async fn handle(&self, id: &SessionId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }
}

impl SessionStore for MemoryStore {
    async fn insert_new(&self, session: Session) -> bool {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return false;
        }
        sessions.insert(session.id().clone(), Arc::new(Mutex::new(session)));
        true
    }

    async fn get(&self, id: &SessionId) -> Option<Session> {
        let handle = self.handle(id).await?;
        let session = handle.lock().await.clone();
        Some(session)
    }

    async fn update<T, F>(&self, id: &SessionId, f: F) -> Result<T, SessionError>
    where
        T: Send,
        F: FnOnce(&mut Session) -> Result<T, SessionError> + Send,
    {
        let handle = self
            .handle(id)
            .await
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;

        let mut stored = handle.lock().await;
        let mut draft = stored.clone();
        let value = f(&mut draft)?;
        *stored = draft;
        Ok(value)
    }

    async fn contains(&self, id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    async fn remove(&self, id: &SessionId) -> Option<Session> {
        let handle = self.sessions.write().await.remove(id)?;
        let session = handle.lock().await.clone();
        Some(session)
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use codebreak_protocol::{Phase, Slot};

    use super::*;

    fn session(id: &str) -> Session {
        Session::new(SessionId::new(id), "Ada")
    }

    /// Builds a finished session: A wins on the first guess.
    fn finished(id: &str) -> Session {
        let mut s = session(id);
        s.join("Bo").unwrap();
        s.commit_secret(Slot::A, "1234").unwrap();
        s.commit_secret(Slot::B, "5678").unwrap();
        s.apply_guess(Slot::A, "5678").unwrap();
        s
    }

    #[tokio::test]
    async fn test_insert_new_fresh_id_returns_true() {
        let store = MemoryStore::new();

        assert!(store.insert_new(session("AAAA")).await);
        assert!(store.contains(&SessionId::new("AAAA")).await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_new_taken_id_keeps_original() {
        let store = MemoryStore::new();
        store.insert_new(session("AAAA")).await;

        let mut other = session("AAAA");
        other.join("Intruder").unwrap();
        assert!(!store.insert_new(other).await);

        let kept = store.get(&SessionId::new("AAAA")).await.unwrap();
        assert_eq!(kept.phase(), Phase::AwaitingPlayers);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get(&SessionId::new("NOPE")).await.is_none());
    }

    #[tokio::test]
    async fn test_update_ok_writes_back() {
        let store = MemoryStore::new();
        let id = SessionId::new("AAAA");
        store.insert_new(session("AAAA")).await;

        let slot = store.update(&id, |s| s.join("Bo")).await.unwrap();

        assert_eq!(slot, Slot::B);
        let stored = store.get(&id).await.unwrap();
        assert_eq!(stored.phase(), Phase::AwaitingSecrets);
    }

    #[tokio::test]
    async fn test_update_err_discards_partial_changes() {
        let store = MemoryStore::new();
        let id = SessionId::new("AAAA");
        store.insert_new(session("AAAA")).await;

        // Mutate, then fail: the join must not stick.
        let result: Result<(), _> = store
            .update(&id, |s| {
                s.join("Bo")?;
                Err(SessionError::GenerationExhausted(0))
            })
            .await;

        assert!(result.is_err());
        let stored = store.get(&id).await.unwrap();
        assert_eq!(stored.phase(), Phase::AwaitingPlayers);
        assert!(!stored.player(Slot::B).joined);
    }

    #[tokio::test]
    async fn test_update_unknown_returns_not_found() {
        let store = MemoryStore::new();
        let result = store.update(&SessionId::new("NOPE"), |_| Ok(())).await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_returns_session_and_forgets_it() {
        let store = MemoryStore::new();
        let id = SessionId::new("AAAA");
        store.insert_new(session("AAAA")).await;

        let removed = store.remove(&id).await;

        assert_eq!(removed.map(|s| s.id().clone()), Some(id.clone()));
        assert!(!store.contains(&id).await);
        assert!(store.remove(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_purge_finished_drops_only_finished() {
        let store = MemoryStore::new();
        store.insert_new(session("LIVE")).await;
        store.insert_new(finished("DONE")).await;

        let purged = store.purge_finished().await;

        assert_eq!(purged, vec![SessionId::new("DONE")]);
        assert!(store.contains(&SessionId::new("LIVE")).await);
        assert!(!store.contains(&SessionId::new("DONE")).await);
    }

    #[tokio::test]
    async fn test_purge_finished_waiting_on_busy_session_leaves_index_unlocked() {
        let store = Arc::new(MemoryStore::new());
        store.insert_new(session("LIVE")).await;
        store.insert_new(finished("DONE")).await;

        // Stand in for an update in flight on LIVE.
        let live = store.handle(&SessionId::new("LIVE")).await.unwrap();
        let busy = live.lock().await;

        let purge = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.purge_finished().await }
        });
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }

        assert!(!purge.is_finished(), "purge should be waiting on LIVE");
        assert!(store.sessions.try_read().is_ok(), "index must stay readable");
        assert!(store.get(&SessionId::new("DONE")).await.is_some());

        drop(busy);
        assert_eq!(purge.await.unwrap(), vec![SessionId::new("DONE")]);
        assert!(store.contains(&SessionId::new("LIVE")).await);
    }

    #[tokio::test]
    async fn test_purge_finished_nothing_finished_is_noop() {
        let store = MemoryStore::new();
        store.insert_new(session("LIVE")).await;

        assert!(store.purge_finished().await.is_empty());
        assert_eq!(store.len().await, 1);
    }
}
