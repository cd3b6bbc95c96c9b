//! Credential store: username → salted password hash, persisted in
//! `users.json`.
//!
//! Passwords are never stored in the clear. Each record carries a random
//! 16-byte salt and `blake3(salt || password)`; verification recomputes the
//! hash and compares through blake3's constant-time `Hash` equality. Login
//! and change-password report the same `InvalidCredentials` error whether
//! the user is unknown or the password is wrong, so the store leaks no
//! account existence information.
//!
//! Every operation is a synchronous read-modify-write of the whole file;
//! there is no concurrent mutation in this application.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SALT_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already taken")]
    UsernameTaken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("username may only contain letters, digits, '.', '_' and '-'")]
    InvalidUsername,

    #[error("credential file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    salt: String,
    password_hash: String,
}

impl UserRecord {
    fn new(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self {
            salt: hex::encode(salt),
            password_hash: hash_password(&salt, password).to_hex().to_string(),
        }
    }

    fn verify(&self, password: &str) -> bool {
        let Ok(salt) = hex::decode(&self.salt) else {
            return false;
        };
        let Ok(stored) = blake3::Hash::from_hex(&self.password_hash) else {
            return false;
        };
        // blake3::Hash equality is constant-time
        hash_password(&salt, password) == stored
    }
}

fn hash_password(salt: &[u8], password: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize()
}

/// Usernames name files on disk (`{username}_watchlist.json`), so the
/// accepted alphabet is restricted at registration.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Open the store, creating an empty `{}` file if none exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, "{}")?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_users(&self) -> Result<BTreeMap<String, UserRecord>, AuthError> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_users(&self, users: &BTreeMap<String, UserRecord>) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(users)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Register a new user. Fails with `UsernameTaken` on an exact
    /// case-sensitive collision; persists the whole store on success.
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if !is_valid_username(username) {
            return Err(AuthError::InvalidUsername);
        }
        let mut users = self.load_users()?;
        if users.contains_key(username) {
            return Err(AuthError::UsernameTaken);
        }
        users.insert(username.to_string(), UserRecord::new(password));
        self.save_users(&users)
    }

    /// Verify a username/password pair. Unknown users and wrong passwords
    /// produce the same error.
    pub fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let users = self.load_users()?;
        match users.get(username) {
            Some(record) if record.verify(password) => Ok(()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Replace a user's password after verifying the old one. The same
    /// uniform `InvalidCredentials` applies.
    pub fn change_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let mut users = self.load_users()?;
        match users.get(username) {
            Some(record) if record.verify(old_password) => {
                users.insert(username.to_string(), UserRecord::new(new_password));
                self.save_users(&users)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> (PathBuf, CredentialStore) {
        let dir = std::env::temp_dir().join(format!("firewatch_auth_{tag}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let store = CredentialStore::open(dir.join("users.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_empty_store() {
        let (dir, store) = temp_store("open");
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "{}");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn register_then_login() {
        let (dir, store) = temp_store("register");
        store.register("alice", "hunter2").unwrap();
        store.login("alice", "hunter2").unwrap();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn register_taken_username_keeps_original_password() {
        let (dir, store) = temp_store("taken");
        store.register("bob", "pw1").unwrap();
        assert!(matches!(
            store.register("bob", "pw2"),
            Err(AuthError::UsernameTaken)
        ));
        store.login("bob", "pw1").unwrap();
        assert!(store.login("bob", "pw2").is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn login_failures_are_indistinguishable() {
        let (dir, store) = temp_store("uniform");
        store.register("bob", "pw1").unwrap();

        let wrong_password = store.login("bob", "wrong").unwrap_err();
        let unknown_user = store.login("nobody", "x").unwrap_err();
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let (dir, store) = temp_store("case");
        store.register("Alice", "pw").unwrap();
        store.register("alice", "pw").unwrap();
        store.login("Alice", "pw").unwrap();
        store.login("alice", "pw").unwrap();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn change_password_flow() {
        let (dir, store) = temp_store("passwd");
        store.register("carol", "old").unwrap();

        assert!(matches!(
            store.change_password("carol", "wrong", "new"),
            Err(AuthError::InvalidCredentials)
        ));
        store.change_password("carol", "old", "new").unwrap();
        store.login("carol", "new").unwrap();
        assert!(store.login("carol", "old").is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn password_is_not_stored_in_clear() {
        let (dir, store) = temp_store("hashed");
        store.register("dave", "supersecret").unwrap();
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(!content.contains("supersecret"));
        assert!(content.contains("salt"));
        assert!(content.contains("password_hash"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn salts_differ_between_users() {
        let (dir, store) = temp_store("salts");
        store.register("u1", "same").unwrap();
        store.register("u2", "same").unwrap();
        let users: BTreeMap<String, UserRecord> =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_ne!(users["u1"].salt, users["u2"].salt);
        assert_ne!(users["u1"].password_hash, users["u2"].password_hash);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn register_rejects_path_hostile_usernames() {
        let (dir, store) = temp_store("hostile");
        assert!(matches!(
            store.register("../evil", "pw"),
            Err(AuthError::InvalidUsername)
        ));
        assert!(matches!(
            store.register("", "pw"),
            Err(AuthError::InvalidUsername)
        ));
        assert!(matches!(
            store.register("a/b", "pw"),
            Err(AuthError::InvalidUsername)
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_store_is_error() {
        let (dir, store) = temp_store("corrupt");
        std::fs::write(store.path(), "not json {{{").unwrap();
        assert!(matches!(
            store.login("anyone", "pw"),
            Err(AuthError::Corrupt(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
