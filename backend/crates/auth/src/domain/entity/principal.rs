//! Principal Entity

use crate::domain::entity::credential::Credential;
use crate::domain::value_object::user_id::UserId;

/// Authenticated identity derived from a validated token.
///
/// Lives for a single request; the auth gate stores it in the request
/// extensions and handlers read it back with the `Principal` extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    /// Email as carried in the token. May be stale if the store changed.
    pub email: String,
}

impl Principal {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

impl From<&Credential> for Principal {
    fn from(credential: &Credential) -> Self {
        Self::new(credential.user_id, credential.email.as_str())
    }
}
