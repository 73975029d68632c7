//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::credential::{Credential, NewCredential};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Insert a new credential and return the assigned id.
    ///
    /// Fails with `AuthError::EmailTaken` when the email is already present,
    /// including when a concurrent insert wins the race.
    async fn create(&self, credential: &NewCredential) -> AuthResult<UserId>;

    /// Find credential by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Credential>>;

    /// Find credential by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<Credential>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}
