//! Login Use Case
//!
//! Verifies email + password and issues a token pair.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::config::AuthConfig;
use crate::application::deadline::with_deadline;
use crate::application::password::{hash_password, verify_password};
use crate::application::token_codec::{TokenCodec, TokenPair};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub user_id: UserId,
    pub tokens: TokenPair,
}

/// Hashed when the email is unknown so the miss costs as much as a wrong
/// password.
const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// Login use case
pub struct LoginUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    hasher: Arc<PasswordHasher>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Malformed email, empty password and unknown user all look the same
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let credential =
            with_deadline(self.config.store_timeout, self.repo.find_by_email(&email)).await?;

        let Some(credential) = credential else {
            self.burn_hash().await;
            return Err(AuthError::InvalidCredentials);
        };

        let valid = verify_password(
            self.hasher.clone(),
            credential.password.clone(),
            raw_password,
        )
        .await?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.codec.issue_pair(&Principal::from(&credential))?;

        tracing::info!(user_id = %credential.user_id, "User logged in");

        Ok(LoginOutput {
            user_id: credential.user_id,
            tokens,
        })
    }

    async fn burn_hash(&self) {
        if let Ok(raw) = RawPassword::new(DUMMY_PASSWORD.to_string()) {
            let _ = hash_password(self.hasher.clone(), raw).await;
        }
    }
}
