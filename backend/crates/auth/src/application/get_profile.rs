//! Get Profile Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::deadline::with_deadline;
use crate::domain::entity::credential::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Get profile use case
pub struct GetProfileUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> GetProfileUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<Credential> {
        if !user_id.is_assigned() {
            return Err(AuthError::InvalidUserId);
        }

        with_deadline(self.config.store_timeout, self.repo.find_by_id(user_id))
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
