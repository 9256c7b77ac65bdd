//! Credential store: the persistence boundary for accounts.
//!
//! The store owns the `username -> Account` mapping and enforces uniqueness
//! atomically with the insert itself, so two requests racing to register the
//! same username resolve to a single winner with no check-then-insert window.

use crate::account::models::Account;
use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::Instrument;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already exists")]
    DuplicateUsername,
    #[error("credential store unavailable: {0}")]
    Unavailable(anyhow::Error),
}

/// Durable mapping from username to account.
///
/// `insert` must be atomic with the uniqueness check; `find_by_username` is a
/// pure lookup that reports absence as `Ok(None)`, never as an error.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn insert(&self, username: &str, password_hash: &str) -> Result<Account, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;
}

/// Postgres-backed credential store.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn insert(&self, username: &str, password_hash: &str) -> Result<Account, StoreError> {
        let query = r"
            INSERT INTO accounts (username, password_hash)
            VALUES ($1, $2)
            RETURNING username, password_hash
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );

        match sqlx::query_as::<_, Account>(query)
            .bind(username)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .instrument(span)
            .await
        {
            Ok(account) => Ok(account),
            Err(err) if is_unique_violation(&err) => Err(StoreError::DuplicateUsername),
            Err(err) => Err(StoreError::Unavailable(err.into())),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let query = "SELECT username, password_hash FROM accounts WHERE username = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );

        sqlx::query_as::<_, Account>(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .map_err(|err| StoreError::Unavailable(err.into()))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

/// In-memory credential store for tests and local experiments.
///
/// A single mutex around the map makes the uniqueness check atomic with the
/// insert, matching the contract the Postgres store gets from its primary
/// key.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    accounts: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.lock().map_or(0, |accounts| accounts.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn insert(&self, username: &str, password_hash: &str) -> Result<Account, StoreError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| StoreError::Unavailable(anyhow!("account table lock poisoned")))?;

        if accounts.contains_key(username) {
            return Err(StoreError::DuplicateUsername);
        }

        accounts.insert(username.to_string(), password_hash.to_string());

        Ok(Account {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| StoreError::Unavailable(anyhow!("account table lock poisoned")))?;

        Ok(accounts.get(username).map(|hash| Account {
            username: username.to_string(),
            password_hash: hash.clone(),
        }))
    }
}
