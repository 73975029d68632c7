//! Token Codec
//!
//! Issues and validates the signed, time-bounded tokens handed to clients.
//!
//! Wire format is a compact JWS signed with HS256 only, carrying a flat claim
//! set `{sub, email, iss, iat, exp, type}`. Validation rejects any other
//! algorithm (including `none`), bad signatures, malformed structure and
//! tokens with `exp <= now`. There is no leeway.
//!
//! `sub` is written as a JSON number but accepted as either a number or a
//! numeric string; it is normalised into a [`UserId`] here and nowhere else.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, crypto, decode_header, encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::config::{AuthConfig, MIN_SECRET_LENGTH, check_ttl};
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{token_type::TokenType, user_id::UserId};
use crate::error::{AuthError, AuthResult, ConfigError};

/// A signed token and the instant its `exp` claim names
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Whole seconds left before expiry, floored at zero
    pub fn expires_in(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at.timestamp() - now.timestamp()).max(0) as u64
    }
}

/// Access and refresh token issued from the same `now`
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Validated claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: UserId,
    pub email: String,
    pub issuer: String,
    /// Unix seconds
    pub issued_at: i64,
    /// Unix seconds
    pub expires_at: i64,
    /// `None` when the claim is absent or not a known type
    pub token_type: Option<TokenType>,
}

impl TokenClaims {
    pub fn principal(&self) -> Principal {
        Principal::new(self.subject, self.email.clone())
    }
}

#[derive(Serialize)]
struct OutgoingClaims<'a> {
    sub: i64,
    email: &'a str,
    iss: &'a str,
    iat: i64,
    exp: i64,
    #[serde(rename = "type")]
    token_type: TokenType,
}

/// Registered claims are read loosely and checked in `parse_at`, so a
/// strangely shaped `sub` is told apart from a broken token.
#[derive(Deserialize)]
struct IncomingClaims {
    #[serde(default)]
    sub: Value,
    #[serde(default)]
    email: String,
    #[serde(default)]
    iss: String,
    #[serde(default)]
    iat: Value,
    #[serde(default)]
    exp: Value,
    #[serde(default, rename = "type")]
    token_type: Value,
}

/// HS256 issuer and validator bound to one secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
}

impl TokenCodec {
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, ConfigError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            access_ttl: ttl("access token TTL", access_ttl)?,
            refresh_ttl: ttl("refresh token TTL", refresh_ttl)?,
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        Self::new(
            &config.token_secret,
            config.issuer.clone(),
            config.access_ttl,
            config.refresh_ttl,
        )
    }

    pub fn issue(
        &self,
        principal: &Principal,
        token_type: TokenType,
        ttl: TimeDelta,
    ) -> AuthResult<IssuedToken> {
        self.issue_at(principal, token_type, ttl, Utc::now())
    }

    pub fn issue_at(
        &self,
        principal: &Principal,
        token_type: TokenType,
        ttl: TimeDelta,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let iat = now.timestamp();
        let exp = iat
            .checked_add(ttl.num_seconds())
            .ok_or_else(|| AuthError::TokenSigning("expiry overflows".to_string()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::TokenSigning("expiry out of range".to_string()))?;

        let claims = OutgoingClaims {
            sub: principal.user_id.get(),
            email: &principal.email,
            iss: &self.issuer,
            iat,
            exp,
            token_type,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenSigning(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Access and refresh token for `principal`, both stamped with one `now`
    pub fn issue_pair(&self, principal: &Principal) -> AuthResult<TokenPair> {
        self.issue_pair_at(principal, Utc::now())
    }

    pub fn issue_pair_at(&self, principal: &Principal, now: DateTime<Utc>) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access: self.issue_at(principal, TokenType::Access, self.access_ttl, now)?,
            refresh: self.issue_at(principal, TokenType::Refresh, self.refresh_ttl, now)?,
        })
    }

    pub fn parse(&self, token: &str) -> AuthResult<TokenClaims> {
        self.parse_at(token, Utc::now())
    }

    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<TokenClaims> {
        let claims = self.verified_claims(token).map_err(|reason| {
            tracing::debug!(reason, "Token failed validation");
            AuthError::InvalidToken
        })?;

        let expires_at = numeric_date(&claims.exp).ok_or_else(|| {
            tracing::debug!(reason = "missing exp", "Token failed validation");
            AuthError::InvalidToken
        })?;
        if expires_at <= now.timestamp() {
            return Err(AuthError::InvalidToken);
        }

        let subject = normalize_subject(&claims.sub)?;
        let token_type = match claims.token_type.as_str() {
            Some("access") => Some(TokenType::Access),
            Some("refresh") => Some(TokenType::Refresh),
            _ => None,
        };

        Ok(TokenClaims {
            subject,
            email: claims.email,
            issuer: claims.iss,
            issued_at: numeric_date(&claims.iat).unwrap_or_default(),
            expires_at,
            token_type,
        })
    }

    /// Structure, algorithm and signature. Claims are only deserialised once
    /// the signature over `header.payload` checks out.
    fn verified_claims(&self, token: &str) -> Result<IncomingClaims, &'static str> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err("not three segments");
        };

        let alg = decode_header(token).map_err(|_| "malformed header")?.alg;
        if alg != Algorithm::HS256 {
            return Err("algorithm not allowed");
        }

        let message = &token[..header.len() + 1 + payload.len()];
        let valid = crypto::verify(signature, message.as_bytes(), &self.decoding_key, alg)
            .map_err(|_| "malformed signature")?;
        if !valid {
            return Err("signature mismatch");
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| "payload is not base64url")?;
        serde_json::from_slice(&payload).map_err(|_| "payload is not a claim set")
    }
}

fn ttl(name: &'static str, value: Duration) -> Result<TimeDelta, ConfigError> {
    check_ttl(name, value)?;
    TimeDelta::from_std(value).map_err(|_| ConfigError::InvalidValue {
        name,
        value: format!("{value:?}"),
    })
}

/// NumericDate: integer or float seconds, fractions dropped
fn numeric_date(value: &Value) -> Option<i64> {
    let n = value.as_number()?;
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f.floor() as i64)
    })
}

/// Integer, integral float or numeric string; anything else is rejected
fn normalize_subject(sub: &Value) -> AuthResult<UserId> {
    let id = match sub {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.map(UserId::from_raw).ok_or(AuthError::InvalidSubject)
}
