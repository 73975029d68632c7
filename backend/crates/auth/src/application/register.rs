//! Register Use Case
//!
//! Creates a credential and signs the new user in.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::config::AuthConfig;
use crate::application::deadline::with_deadline;
use crate::application::password::hash_password;
use crate::application::token_codec::{TokenCodec, TokenPair};
use crate::domain::entity::credential::NewCredential;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    email::Email, full_name::FullName, user_id::UserId, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Register output
pub struct RegisterOutput {
    pub user_id: UserId,
    pub tokens: TokenPair,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    hasher: Arc<PasswordHasher>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(
        repo: Arc<R>,
        hasher: Arc<PasswordHasher>,
        codec: Arc<TokenCodec>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            hasher,
            codec,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        if input.email.trim().is_empty()
            || input.password.is_empty()
            || input.full_name.trim().is_empty()
        {
            return Err(AuthError::MissingFields);
        }

        let email = Email::new(&input.email)?;
        let full_name = FullName::new(&input.full_name)?;
        let raw_password = RawPassword::new(input.password)?;

        let timeout = self.config.store_timeout;

        if with_deadline(timeout, self.repo.exists_by_email(&email)).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = hash_password(self.hasher.clone(), raw_password).await?;

        let credential = NewCredential {
            email,
            password,
            full_name,
        };

        // A concurrent register for the same email surfaces here as EmailTaken
        let user_id = with_deadline(timeout, self.repo.create(&credential)).await?;

        let principal = Principal::new(user_id, credential.email.as_str());
        let tokens = self.codec.issue_pair(&principal)?;

        tracing::info!(user_id = %user_id, "User registered");

        Ok(RegisterOutput { user_id, tokens })
    }
}
