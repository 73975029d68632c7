//! Refresh Use Case
//!
//! Trades a refresh token for a fresh token pair. Stateless: the presented
//! refresh token is not revoked and stays valid until its own `exp`.

use std::sync::Arc;

use crate::application::token_codec::{TokenCodec, TokenPair};
use crate::domain::value_object::{token_type::TokenType, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Refresh output
pub struct RefreshOutput {
    pub user_id: UserId,
    pub tokens: TokenPair,
}

/// Refresh use case
pub struct RefreshUseCase {
    codec: Arc<TokenCodec>,
}

impl RefreshUseCase {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn execute(&self, refresh_token: Option<&str>) -> AuthResult<RefreshOutput> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        let claims = self.codec.parse(token)?;

        if claims.token_type != Some(TokenType::Refresh) {
            return Err(AuthError::WrongTokenType);
        }

        let principal = claims.principal();
        let tokens = self.codec.issue_pair(&principal)?;

        tracing::debug!(user_id = %principal.user_id, "Token pair refreshed");

        Ok(RefreshOutput {
            user_id: principal.user_id,
            tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::principal::Principal;
    use chrono::TimeDelta;
    use std::time::Duration;

    fn codec() -> Arc<TokenCodec> {
        Arc::new(
            TokenCodec::new(
                b"0123456789abcdef0123456789abcdef",
                "sessiongate",
                Duration::from_secs(900),
                Duration::from_secs(3600),
            )
            .unwrap(),
        )
    }

    fn principal() -> Principal {
        Principal::new(UserId::from_raw(3), "a@x.com")
    }

    #[test]
    fn test_missing_token() {
        let use_case = RefreshUseCase::new(codec());
        assert!(matches!(
            use_case.execute(None),
            Err(AuthError::MissingRefreshToken)
        ));
        assert!(matches!(
            use_case.execute(Some("")),
            Err(AuthError::MissingRefreshToken)
        ));
    }

    #[test]
    fn test_access_token_rejected() {
        let codec = codec();
        let pair = codec.issue_pair(&principal()).unwrap();
        let use_case = RefreshUseCase::new(codec);

        assert!(matches!(
            use_case.execute(Some(&pair.access.token)),
            Err(AuthError::WrongTokenType)
        ));
    }

    #[test]
    fn test_refresh_issues_new_pair_for_same_subject() {
        let codec = codec();
        let pair = codec.issue_pair(&principal()).unwrap();
        let use_case = RefreshUseCase::new(codec.clone());

        let output = use_case.execute(Some(&pair.refresh.token)).unwrap();
        assert_eq!(output.user_id, UserId::from_raw(3));

        let access = codec.parse(&output.tokens.access.token).unwrap();
        assert_eq!(access.email, "a@x.com");
        assert_eq!(access.token_type, Some(TokenType::Access));

        // No revocation: the old refresh token still works
        assert!(use_case.execute(Some(&pair.refresh.token)).is_ok());
    }

    #[test]
    fn test_expired_refresh_token() {
        let codec = codec();
        let stale = codec
            .issue_at(
                &principal(),
                TokenType::Refresh,
                TimeDelta::minutes(1),
                chrono::Utc::now() - TimeDelta::hours(1),
            )
            .unwrap();
        let use_case = RefreshUseCase::new(codec);

        assert!(matches!(
            use_case.execute(Some(&stale.token)),
            Err(AuthError::InvalidToken)
        ));
    }
}
