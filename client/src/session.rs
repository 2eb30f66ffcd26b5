use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::User;
use crate::error::ApiError;

/// Storage key for the combined session record.
const SESSION_KEY: &str = "session";

/// Opaque key-value store the session is persisted in. Hosts plug in
/// whatever they have (browser storage, a config file, …); tests and
/// short-lived processes use [`MemoryStorage`].
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-process backend over a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

impl<S: StorageBackend> StorageBackend for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Persisted session state. Token and user live in one record so a login
/// or logout is a single storage write; there is no window where the token
/// exists without its user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

type RedirectHook = Box<dyn Fn() + Send + Sync>;

/// Holds the auth token and the cached user record.
///
/// Passed by `Arc` to the API client and the realtime channel rather than
/// living in ambient global state, so call sites own its lifecycle.
pub struct SessionStore {
    storage: Box<dyn StorageBackend>,
    redirect: Option<RedirectHook>,
}

impl SessionStore {
    pub fn new(storage: impl StorageBackend + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            redirect: None,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Registers the navigation performed after [`logout`](Self::logout)
    /// clears the session, typically a redirect to the login page.
    pub fn with_redirect(mut self, redirect: impl Fn() + Send + Sync + 'static) -> Self {
        self.redirect = Some(Box::new(redirect));
        self
    }

    fn load(&self) -> Result<Session, ApiError> {
        match self.storage.get(SESSION_KEY) {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Session::default()),
        }
    }

    fn store(&self, session: &Session) -> Result<(), ApiError> {
        let raw = serde_json::to_string(session)?;
        self.storage.set(SESSION_KEY, raw);
        Ok(())
    }

    /// Current auth token, if any. A corrupt session record reads as no
    /// token rather than an error; only the user record has a parse path
    /// that callers can observe.
    pub fn token(&self) -> Option<String> {
        self.load().ok().and_then(|session| session.token)
    }

    /// Cached user record. `Ok(None)` when nothing is stored; corrupt JSON
    /// propagates to the caller, there is no recovery policy here.
    pub fn current_user(&self) -> Result<Option<User>, ApiError> {
        Ok(self.load()?.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Writes token and user as one record.
    pub fn persist(&self, token: String, user: User) -> Result<(), ApiError> {
        self.store(&Session {
            token: Some(token),
            user: Some(user),
        })
    }

    /// Shallow-merges a partial JSON object into the cached user (updates
    /// win on key conflicts) and re-persists. No-op when no user is cached
    /// or when `updates` is not an object.
    pub fn update_user(&self, updates: Value) -> Result<(), ApiError> {
        let mut session = self.load()?;
        let Some(user) = session.user.take() else {
            return Ok(());
        };
        let Value::Object(updates) = updates else {
            session.user = Some(user);
            return Ok(());
        };

        let mut merged = match serde_json::to_value(&user)? {
            Value::Object(map) => map,
            _ => return Err(ApiError::storage("cached user is not a JSON object")),
        };
        for (key, value) in updates {
            merged.insert(key, value);
        }
        session.user = Some(serde_json::from_value(Value::Object(merged))?);
        self.store(&session)
    }

    /// Removes the session record and fires the redirect hook. Called both
    /// by explicit logout and by the request gateway on 401/403; there is
    /// no conditional path, any caller loses the whole session.
    pub fn logout(&self) {
        self.storage.remove(SESSION_KEY);
        log::info!("session cleared");
        if let Some(redirect) = &self.redirect {
            redirect();
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn sample_user() -> User {
        serde_json::from_value(json!({
            "id": "u1",
            "name": "Asha",
            "email": "asha@example.com",
            "ecoPoints": 10
        }))
        .unwrap()
    }

    #[test]
    fn empty_store_is_unauthenticated() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn persist_round_trips_token_and_user() {
        let store = SessionStore::in_memory();
        store.persist("tok-1".into(), sample_user()).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(store.current_user().unwrap(), Some(sample_user()));
    }

    #[test]
    fn logout_clears_record_and_fires_redirect() {
        let redirected = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&redirected);
        let store = SessionStore::in_memory()
            .with_redirect(move || flag.store(true, Ordering::SeqCst));
        store.persist("tok-1".into(), sample_user()).unwrap();

        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.current_user().unwrap().is_none());
        assert!(redirected.load(Ordering::SeqCst));
    }

    #[test]
    fn update_user_merges_and_updates_win() {
        let store = SessionStore::in_memory();
        store.persist("tok-1".into(), sample_user()).unwrap();

        store
            .update_user(json!({ "ecoPoints": 25, "hostel": "B-Block" }))
            .unwrap();

        let user = store.current_user().unwrap().unwrap();
        assert_eq!(user.eco_points, 25);
        assert_eq!(user.extra["hostel"], json!("B-Block"));
        // untouched fields survive the merge
        assert_eq!(user.name, "Asha");
    }

    #[test]
    fn update_user_without_cached_user_is_a_no_op() {
        let backend = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(Arc::clone(&backend));

        store.update_user(json!({ "ecoPoints": 5 })).unwrap();
        assert!(backend.get(SESSION_KEY).is_none());
    }

    #[test]
    fn corrupt_record_surfaces_from_current_user_only() {
        let backend = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(Arc::clone(&backend));
        backend.set(SESSION_KEY, "not json".into());

        assert!(store.current_user().is_err());
        assert!(store.token().is_none());
        assert!(!store.is_authenticated());
    }
}
