//! Password hashing off the async runtime
//!
//! Argon2 is deliberately slow, so both directions run on tokio's blocking
//! pool instead of stalling a worker thread.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

pub async fn hash_password(
    hasher: Arc<PasswordHasher>,
    raw: RawPassword,
) -> AuthResult<UserPassword> {
    tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, &hasher))
        .await
        .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
}

pub async fn verify_password(
    hasher: Arc<PasswordHasher>,
    hashed: UserPassword,
    raw: RawPassword,
) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || hashed.verify(&raw, &hasher))
        .await
        .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))
}
