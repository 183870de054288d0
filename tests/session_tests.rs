//! Integration tests for session persistence
//!
//! Tests the file and memory stores and the session manager on top of them

use rbac_chat::session::{Session, SessionManager};
use rbac_chat::storage::{FileStore, KeyValueStore, MemoryStore};

mod store_tests {
    use super::*;

    #[test]
    fn test_file_store_set_and_get() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path().join("state"));

        store.set("rbacAuth", r#"{"token":"t"}"#).expect("Failed to set");

        assert_eq!(
            store.get("rbacAuth").expect("Failed to get"),
            Some(r#"{"token":"t"}"#.to_string())
        );
    }

    #[test]
    fn test_file_store_missing_key() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("nonexistent").expect("Failed to get"), None);
    }

    #[test]
    fn test_file_store_overwrites_value() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        store.set("rbacAuth", r#"{"token":"t"}"#).expect("Failed to set");
        store
            .set("rbacAuth", r#"{"token":null,"categories":[]}"#)
            .expect("Failed to overwrite");

        assert_eq!(
            store.get("rbacAuth").expect("Failed to get").as_deref(),
            Some(r#"{"token":null,"categories":[]}"#)
        );
    }

    #[test]
    fn test_file_store_keys_stay_inside_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path().join("state"));

        store.set("../outside", "x").expect("Failed to set");

        assert!(!dir.path().join("outside.json").exists());
        assert_eq!(store.get("../outside").expect("Failed to get").as_deref(), Some("x"));
    }
}

mod manager_tests {
    use super::*;

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut first = SessionManager::new(Box::new(FileStore::new(dir.path())), "rbacAuth");
        first.save(Some(Session::new(
            "tok",
            vec!["public".into(), "internal".into()],
        )));

        let mut second = SessionManager::new(Box::new(FileStore::new(dir.path())), "rbacAuth");
        let restored = second.restore().clone();

        assert_eq!(restored.token.as_deref(), Some("tok"));
        assert_eq!(restored.categories, vec!["public", "internal"]);
        assert_eq!(second.token(), Some("tok"));
    }

    #[test]
    fn test_logout_persists_empty_session() {
        let store = MemoryStore::default();
        let mut manager = SessionManager::new(Box::new(store.clone()), "rbacAuth");
        manager.save(Some(Session::new("tok", vec!["private".into()])));

        manager.save(None);

        let mut fresh = SessionManager::new(Box::new(store), "rbacAuth");
        assert!(!fresh.restore().is_authenticated());
        assert_eq!(fresh.current(), &Session::default());
    }

    #[test]
    fn test_unwritable_directory_is_ignored() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").expect("Failed to write blocker");

        // The store directory sits below a regular file, so every write fails.
        let mut manager = SessionManager::new(Box::new(FileStore::new(blocker.join("state"))), "rbacAuth");
        manager.save(Some(Session::new("tok", vec!["public".into()])));

        assert_eq!(manager.token(), Some("tok"));
        assert!(!manager.restore().is_authenticated());
    }

    #[test]
    fn test_store_isolation_by_key() {
        let store = MemoryStore::default();
        let mut alice = SessionManager::new(Box::new(store.clone()), "alice");
        let mut bob = SessionManager::new(Box::new(store), "bob");

        alice.save(Some(Session::new("a", vec!["public".into()])));

        assert!(!bob.restore().is_authenticated());
        assert_eq!(alice.restore().token.as_deref(), Some("a"));
    }
}
