//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! validated eagerly; request handling only ever sees a valid config.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::duration::parse_duration;
use platform::password::PasswordHasher;

use crate::domain::value_object::token_type::TokenType;
use crate::error::ConfigError;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;
/// Re-export HashCost from platform
pub use platform::password::HashCost;

/// HS256 keys shorter than this are refused at startup
pub const MIN_SECRET_LENGTH: usize = 32;

/// Token timestamps are whole seconds
pub const MIN_TOKEN_TTL: Duration = Duration::from_secs(1);

pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(720 * 3600);
pub const DEFAULT_ISSUER: &str = "sessiongate";
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

/// Which token types the bearer gate accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BearerPolicy {
    /// Any validly signed token, refresh tokens included
    #[default]
    AnyTokenType,
    /// Only `type = access`
    AccessOnly,
}

impl BearerPolicy {
    pub fn accepts(&self, token_type: Option<TokenType>) -> bool {
        match self {
            BearerPolicy::AnyTokenType => true,
            BearerPolicy::AccessOnly => token_type == Some(TokenType::Access),
        }
    }
}

impl FromStr for BearerPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(BearerPolicy::AnyTokenType),
            "access-only" | "access_only" => Ok(BearerPolicy::AccessOnly),
            _ => Err(()),
        }
    }
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing secret (at least 32 bytes)
    pub token_secret: Vec<u8>,
    /// `iss` claim of issued tokens
    pub issuer: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub refresh_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    pub hash_cost: HashCost,
    pub bearer_policy: BearerPolicy,
    /// Deadline for each credential store call
    pub store_timeout: Duration,
}

impl AuthConfig {
    /// Production defaults around the given secret
    pub fn new(token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: token_secret.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
            refresh_cookie_name: REFRESH_COOKIE_NAME.to_string(),
            cookie_secure: true,
            // The refresh cookie must travel on cross-site requests from the
            // frontend origin
            cookie_same_site: SameSite::None,
            password_pepper: None,
            hash_cost: HashCost::default(),
            bearer_policy: BearerPolicy::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Create config for development (random secret, insecure cookie, cheap
    /// hashing)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            cookie_same_site: SameSite::Lax,
            hash_cost: HashCost::minimal(),
            ..Self::new(platform::crypto::random_bytes(MIN_SECRET_LENGTH))
        }
    }

    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let mut config = Self::new(secret.into_bytes());

        if let Some(issuer) = get("JWT_ISSUER") {
            config.issuer = issuer;
        }
        if let Some(ttl) = get("JWT_ACCESS_TTL") {
            config.access_ttl = duration_var("JWT_ACCESS_TTL", &ttl)?;
        }
        if let Some(ttl) = get("JWT_REFRESH_TTL") {
            config.refresh_ttl = duration_var("JWT_REFRESH_TTL", &ttl)?;
        }
        if let Some(timeout) = get("STORE_TIMEOUT") {
            config.store_timeout = duration_var("STORE_TIMEOUT", &timeout)?;
        }
        if let Some(secure) = get("COOKIE_SECURE") {
            config.cookie_secure = bool_var("COOKIE_SECURE", &secure)?;
        }
        if let Some(policy) = get("BEARER_POLICY") {
            config.bearer_policy = policy.parse().map_err(|_| ConfigError::InvalidValue {
                name: "BEARER_POLICY",
                value: policy.clone(),
            })?;
        }
        config.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);

        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the token codec and hasher rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: self.token_secret.len(),
            });
        }
        check_ttl("access token TTL", self.access_ttl)?;
        check_ttl("refresh token TTL", self.refresh_ttl)?;
        if self.store_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("store timeout"));
        }
        self.password_hasher()?;
        Ok(())
    }

    pub fn password_hasher(&self) -> Result<PasswordHasher, ConfigError> {
        Ok(PasswordHasher::new(self.hash_cost, self.password_pepper.clone())?)
    }

    /// Attributes of the refresh token cookie
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .field("hash_cost", &self.hash_cost)
            .field("bearer_policy", &self.bearer_policy)
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

/// Zero and sub-second TTLs would produce tokens with `exp <= iat`
pub(crate) fn check_ttl(name: &'static str, ttl: Duration) -> Result<(), ConfigError> {
    if ttl.is_zero() {
        return Err(ConfigError::ZeroDuration(name));
    }
    if ttl < MIN_TOKEN_TTL {
        return Err(ConfigError::SubSecondTtl(name));
    }
    Ok(())
}

fn duration_var(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_duration(value).map_err(|source| ConfigError::InvalidDuration { name, source })
}

fn bool_var(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}
