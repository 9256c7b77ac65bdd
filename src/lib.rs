//! # Konto (Account registration and login)
//!
//! `konto` is a small HTTP service that registers accounts and checks
//! credentials against a Postgres-backed credential store.
//!
//! ## Accounts
//!
//! An account is a unique username plus an Argon2id password hash in PHC
//! string form. The plaintext password is hashed with a fresh random salt on
//! registration and never persisted or logged; inbound plaintext travels as
//! [`secrecy::SecretString`].
//!
//! ## Login
//!
//! Login verifies the submitted password with the hash function's own
//! verification routine. An unknown username and a wrong password produce the
//! same error, the same response, and the same amount of hashing work, so the
//! service does not reveal whether a username is registered.

pub mod account;
pub mod cli;
pub mod konto;
