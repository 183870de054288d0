//! The active login session and its persistence.

use crate::storage::KeyValueStore;
use crate::types::{Category, null_as_default};
use serde::{Deserialize, Serialize};

/// Token plus the categories the server granted with it.
///
/// Serialized as `{"token": ..., "categories": [...]}`; a logged-out session
/// is stored as `{"token": null, "categories": []}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            token: Some(token.into()),
            categories,
        }
    }

    /// An empty token counts as no token.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    pub fn grants(&self, category: Category) -> bool {
        self.categories.iter().any(|label| label == category.as_str())
    }

    /// Granted categories that belong to the known vocabulary, in grant order.
    pub fn known_categories(&self) -> Vec<Category> {
        let mut known = Vec::new();
        for category in self.categories.iter().filter_map(|l| Category::from_label(l)) {
            if !known.contains(&category) {
                known.push(category);
            }
        }
        known
    }

    pub fn role_label(&self) -> String {
        self.categories.join(", ")
    }
}

/// Owns the one process-wide session.
///
/// Persistence is best-effort: storage and parse failures are logged and
/// otherwise ignored, and unreadable data counts as logged out.
pub struct SessionManager {
    store: Box<dyn KeyValueStore>,
    key: String,
    current: Session,
}

impl SessionManager {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            current: Session::default(),
        }
    }

    pub fn current(&self) -> &Session {
        &self.current
    }

    pub fn token(&self) -> Option<&str> {
        self.current.token.as_deref()
    }

    /// Load the persisted session; adopt it only when it carries a token.
    pub fn restore(&mut self) -> &Session {
        self.current = self.load().filter(Session::is_authenticated).unwrap_or_default();
        &self.current
    }

    /// Persist `session` (or the empty session) and make it active.
    pub fn save(&mut self, session: Option<Session>) {
        self.current = session.unwrap_or_default();
        match serde_json::to_string(&self.current) {
            Ok(serialized) => {
                if let Err(err) = self.store.set(&self.key, &serialized) {
                    tracing::debug!("session not persisted: {}", err);
                }
            }
            Err(err) => tracing::debug!("session not serialized: {}", err),
        }
    }

    fn load(&self) -> Option<Session> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::debug!("session storage unreadable: {}", err);
                return None;
            }
        };
        match serde_json::from_str::<Option<Session>>(&raw) {
            Ok(session) => session,
            Err(err) => {
                tracing::debug!("persisted session malformed: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn known_categories_skip_unknown_and_duplicates() {
        let session = Session::new(
            "t",
            vec!["internal".into(), "root".into(), "public".into(), "internal".into()],
        );
        assert_eq!(
            session.known_categories(),
            vec![Category::Internal, Category::Public]
        );
        assert_eq!(session.role_label(), "internal, root, public, internal");
        assert!(session.grants(Category::Public));
        assert!(!session.grants(Category::Private));
    }

    #[test]
    fn broken_storage_is_ignored() {
        let mut manager = SessionManager::new(Box::new(BrokenStore), "rbacAuth");
        manager.save(Some(Session::new("t", vec!["public".into()])));
        assert_eq!(manager.token(), Some("t"));
        assert_eq!(manager.restore(), &Session::default());
    }

    #[test]
    fn save_none_writes_empty_session() {
        let store = MemoryStore::default();
        let mut manager = SessionManager::new(Box::new(store.clone()), "rbacAuth");
        manager.save(None);
        assert_eq!(
            store.get("rbacAuth").unwrap().as_deref(),
            Some(r#"{"token":null,"categories":[]}"#)
        );
    }

    #[test]
    fn restore_ignores_null_and_garbage() {
        let store = MemoryStore::default();
        let mut manager = SessionManager::new(Box::new(store.clone()), "rbacAuth");

        store.set("rbacAuth", "null").unwrap();
        assert!(!manager.restore().is_authenticated());

        store.set("rbacAuth", "{not json").unwrap();
        assert!(!manager.restore().is_authenticated());

        store.set("rbacAuth", r#"{"token":"","categories":["private"]}"#).unwrap();
        assert!(!manager.restore().is_authenticated());
        assert_eq!(manager.current(), &Session::default());

        store.set("rbacAuth", r#"{"token":"abc"}"#).unwrap();
        let restored = manager.restore();
        assert_eq!(restored.token.as_deref(), Some("abc"));
        assert!(restored.categories.is_empty());

        store.set("rbacAuth", r#"{"token":"abc","categories":null}"#).unwrap();
        let restored = manager.restore();
        assert_eq!(restored.token.as_deref(), Some("abc"));
        assert!(restored.categories.is_empty());
    }
}
