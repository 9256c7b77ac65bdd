use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One registered user: the natural key plus its salted password hash.
///
/// The hash is a PHC-format Argon2id string with the salt embedded; the
/// plaintext password is never stored. `password_hash` is skipped when
/// serializing so it cannot end up in a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Proof of a successful credential check. Identity only; no session token
/// is minted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub username: String,
}
