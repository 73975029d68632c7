//! Auth Middleware
//!
//! Bearer gate for protected routes. A request that passes carries its
//! [`Principal`] in the request extensions; handlers take it as an
//! extractor argument.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::config::BearerPolicy;
use crate::application::token_codec::TokenCodec;
use crate::domain::entity::principal::Principal;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGateState {
    pub codec: Arc<TokenCodec>,
    pub policy: BearerPolicy,
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer_token(
    State(gate): State<AuthGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = {
        let token = bearer_token(req.headers()).ok_or(AuthError::MissingBearerToken)?;
        gate.codec.parse(token)?
    };

    if !gate.policy.accepts(claims.token_type) {
        return Err(AuthError::WrongTokenType);
    }

    req.extensions_mut().insert(claims.principal());

    Ok(next.run(req).await)
}

/// `Authorization: Bearer <token>`. Scheme is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Reads the principal stored by [`require_bearer_token`]. Rejects with 401
/// on routes the gate does not cover.
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AuthError::MissingBearerToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn test_bearer_token_malformed() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("abc.def.ghi")), None);
    }
}
