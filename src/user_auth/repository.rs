//! Credential store for the `users` table

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::db::StoreError;

/// Stored user credentials
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// PHC-formatted argon2 hash, never serialized
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A taken username yields `StoreError::Conflict`.
    async fn create(&self, username: &str, password_hash: &str) -> Result<i64, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// PostgreSQL-backed credential store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id"#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(r#"SELECT id, username, password FROM users WHERE username = $1"#)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| -> Result<User, StoreError> {
            Ok(User {
                id: r.try_get("id")?,
                username: r.try_get("username")?,
                password_hash: r.try_get("password")?,
            })
        })
        .transpose()
    }
}

/// In-memory store for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    pub struct InMemoryUserStore {
        users: Mutex<HashMap<String, User>>,
        fail: AtomicBool,
    }

    impl InMemoryUserStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        pub fn stored_hash(&self, username: &str) -> Option<String> {
            self.users
                .lock()
                .unwrap()
                .get(username)
                .map(|u| u.password_hash.clone())
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(StoreError::Database(sqlx::Error::PoolTimedOut))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl UserStore for InMemoryUserStore {
        async fn create(&self, username: &str, password_hash: &str) -> Result<i64, StoreError> {
            self.check()?;
            let mut users = self.users.lock().unwrap();
            if users.contains_key(username) {
                return Err(StoreError::Conflict(format!(
                    "duplicate key value violates unique constraint (username={})",
                    username
                )));
            }
            let id = users.len() as i64 + 1;
            users.insert(
                username.to_string(),
                User {
                    id,
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                },
            );
            Ok(id)
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
            self.check()?;
            Ok(self.users.lock().unwrap().get(username).cloned())
        }
    }
}
