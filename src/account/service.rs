//! Account service: registration and login semantics.
//!
//! This is the only layer with business logic. Hashing happens here as an
//! explicit step before the store insert, not in a persistence hook, so the
//! contract is visible and testable without a database. The store is an
//! injected handle; the service keeps no state of its own beyond a fallback
//! hash used to equalize login timing.

use crate::account::{
    models::{Account, Authenticated},
    password::{hash_password, verify_password},
    repo::{CredentialStore, StoreError},
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use thiserror::Error;
use tokio::task;

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("username and password must not be empty")]
    Validation,
    #[error("username already exists")]
    DuplicateUsername,
    #[error("password hashing failed: {0}")]
    Hashing(anyhow::Error),
    #[error("credential store unavailable: {0}")]
    StorageUnavailable(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown username and wrong password collapse into this one variant so
    /// nothing downstream can tell them apart.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("credential verification failed: {0}")]
    Verification(anyhow::Error),
    #[error("credential store unavailable: {0}")]
    StorageUnavailable(anyhow::Error),
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    fallback_hash: String,
}

impl AccountService {
    /// Build the service around a credential store.
    ///
    /// Hashes a throwaway value once so that login can burn the same work
    /// when the username is unknown as when a stored hash mismatches.
    ///
    /// # Errors
    /// Returns an error if the fallback hash cannot be computed.
    pub fn new(store: Arc<dyn CredentialStore>) -> Result<Self> {
        let fallback_hash = hash_password(&ulid::Ulid::new().to_string())?;

        Ok(Self {
            store,
            fallback_hash,
        })
    }

    /// Register a new account.
    ///
    /// The plaintext is hashed with a fresh salt on the blocking pool, then
    /// inserted; the store's atomic uniqueness check decides duplicate
    /// races. The returned account carries the hash for the caller's own
    /// use; handlers never echo it back.
    ///
    /// # Errors
    /// `Validation` on empty inputs, `DuplicateUsername` when the username is
    /// taken, `Hashing`/`StorageUnavailable` on infrastructure faults.
    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Account, RegisterError> {
        let username = username.trim();
        if username.is_empty() || password.expose_secret().is_empty() {
            return Err(RegisterError::Validation);
        }

        let plaintext = password.expose_secret().to_owned();
        let hash = task::spawn_blocking(move || hash_password(&plaintext))
            .await
            .map_err(|e| RegisterError::Hashing(e.into()))?
            .map_err(RegisterError::Hashing)?;

        match self.store.insert(username, &hash).await {
            Ok(account) => Ok(account),
            Err(StoreError::DuplicateUsername) => Err(RegisterError::DuplicateUsername),
            Err(StoreError::Unavailable(e)) => Err(RegisterError::StorageUnavailable(e)),
        }
    }

    /// Check a username/password pair against the store.
    ///
    /// Empty inputs, an unknown username, and a wrong password all fail with
    /// `InvalidCredentials`. For an unknown username the submitted password
    /// is still verified, against the fallback hash, so response timing does
    /// not reveal whether the account exists.
    ///
    /// # Errors
    /// `InvalidCredentials` on any credential failure,
    /// `Verification`/`StorageUnavailable` on infrastructure faults.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Authenticated, LoginError> {
        let username = username.trim();
        if username.is_empty() || password.expose_secret().is_empty() {
            return Err(LoginError::InvalidCredentials);
        }

        let account = self
            .store
            .find_by_username(username)
            .await
            .map_err(|e| match e {
                StoreError::Unavailable(e) => LoginError::StorageUnavailable(e),
                StoreError::DuplicateUsername => {
                    LoginError::Verification(anyhow::anyhow!("unexpected store error on lookup"))
                }
            })?;

        let (stored_hash, known) = match &account {
            Some(account) => (account.password_hash.clone(), true),
            None => (self.fallback_hash.clone(), false),
        };

        let plaintext = password.expose_secret().to_owned();
        let matched = task::spawn_blocking(move || verify_password(&plaintext, &stored_hash))
            .await
            .map_err(|e| LoginError::Verification(e.into()))?
            .map_err(LoginError::Verification)?;

        if known && matched {
            Ok(Authenticated {
                username: username.to_string(),
            })
        } else {
            Err(LoginError::InvalidCredentials)
        }
    }
}
