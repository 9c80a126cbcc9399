use async_trait::async_trait;

use super::domain::{App, User};
use super::errors::StorageError;

/// Persists newly registered users.
#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Store a user and return its generated id; `StorageError::UserExists` when the email is taken.
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<String, StorageError>;
}

/// Reads users and their privileges.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// `StorageError::UserNotFound` when no user has this exact email.
    async fn user(&self, email: &str) -> Result<User, StorageError>;
    /// `StorageError::UserNotFound` for unknown ids.
    async fn is_admin(&self, user_id: &str) -> Result<bool, StorageError>;
}

/// Reads client applications.
#[async_trait]
pub trait AppProvider: Send + Sync {
    /// `StorageError::AppNotFound` for unknown ids.
    async fn app(&self, app_id: i32) -> Result<App, StorageError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use dashmap::{mapref::entry::Entry, DashMap};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use uuid::Uuid;

    #[derive(Clone)]
    struct StoredUser {
        email: String,
        password_hash: String,
        is_admin: bool,
    }

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: DashMap<String, StoredUser>,   // key: user id
        by_email: DashMap<String, String>,    // email -> user id
        apps: DashMap<i32, (String, String)>, // id -> (name, secret)
        calls: AtomicUsize,
        unavailable: AtomicBool,
    }

    impl MockAuthRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Provision an app directly.
        pub fn insert_app(&self, id: i32, name: &str, secret: &str) {
            self.apps.insert(id, (name.to_string(), secret.to_string()));
        }

        /// Flip the admin flag of an existing user; returns `false` for unknown ids.
        pub fn set_admin(&self, user_id: &str, is_admin: bool) -> bool {
            match self.users.get_mut(user_id) {
                Some(mut u) => {
                    u.is_admin = is_admin;
                    true
                }
                None => false,
            }
        }

        /// Make every subsequent storage call fail with `StorageError::Db`.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Number of storage contract calls served so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn user_count(&self) -> usize {
            self.users.len()
        }

        fn enter(&self) -> Result<(), StorageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(StorageError::Db("storage unavailable".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserSaver for MockAuthRepository {
        async fn save_user(&self, email: &str, password_hash: &str) -> Result<String, StorageError> {
            self.enter()?;
            match self.by_email.entry(email.to_string()) {
                Entry::Occupied(_) => Err(StorageError::UserExists),
                Entry::Vacant(slot) => {
                    let id = Uuid::new_v4().to_string();
                    self.users.insert(
                        id.clone(),
                        StoredUser { email: email.to_string(), password_hash: password_hash.to_string(), is_admin: false },
                    );
                    slot.insert(id.clone());
                    Ok(id)
                }
            }
        }
    }

    #[async_trait]
    impl UserProvider for MockAuthRepository {
        async fn user(&self, email: &str) -> Result<User, StorageError> {
            self.enter()?;
            let id = self.by_email.get(email).map(|r| r.value().clone()).ok_or(StorageError::UserNotFound)?;
            let stored = self.users.get(&id).map(|r| r.value().clone()).ok_or(StorageError::UserNotFound)?;
            Ok(User { id, email: stored.email, password_hash: stored.password_hash })
        }

        async fn is_admin(&self, user_id: &str) -> Result<bool, StorageError> {
            self.enter()?;
            self.users.get(user_id).map(|r| r.is_admin).ok_or(StorageError::UserNotFound)
        }
    }

    #[async_trait]
    impl AppProvider for MockAuthRepository {
        async fn app(&self, app_id: i32) -> Result<App, StorageError> {
            self.enter()?;
            let (name, secret) = self.apps.get(&app_id).map(|r| r.value().clone()).ok_or(StorageError::AppNotFound)?;
            Ok(App::new(app_id, name, secret))
        }
    }

}
