//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Security Features
//! - Argon2id hashing (memory-hard)
//! - Automatic memory zeroization
//! - Constant-time comparison
//! - Unicode NFKC normalization
//!
//! Both operations are CPU-bound; async callers go through
//! `application::password`, which moves them onto the blocking pool.

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// The only policy is non-emptiness; strength rules are the client's
    /// concern.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw);
        if clear_text.is_empty() {
            return Err(AuthError::MissingFields);
        }
        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword, hasher: &PasswordHasher) -> AuthResult<Self> {
        Ok(Self(hasher.hash(&raw.0)?))
    }

    /// Wrap the stored PHC string. A corrupt value never verifies.
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(phc_string))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    pub fn verify(&self, raw: &RawPassword, hasher: &PasswordHasher) -> bool {
        hasher.verify(&self.0, &raw.0)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::HashCost;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(HashCost::minimal(), None).unwrap()
    }

    #[test]
    fn test_raw_password_only_rejects_empty() {
        assert!(RawPassword::new("secret1".to_string()).is_ok());
        assert!(RawPassword::new("x".to_string()).is_ok());
        assert!(matches!(
            RawPassword::new(String::new()),
            Err(AuthError::MissingFields)
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, &hasher).unwrap();

        assert!(hashed.verify(&raw, &hasher));

        let wrong = RawPassword::new("secret2".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, &hasher));
    }

    #[test]
    fn test_db_roundtrip() {
        let hasher = hasher();
        let raw = RawPassword::new("最も安全なパスワード".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, &hasher).unwrap();

        let restored = UserPassword::from_db(hashed.as_phc_string().to_string());
        assert!(restored.verify(&raw, &hasher));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, &hasher()).unwrap();
        assert!(format!("{:?}", hashed).contains("HASH"));
    }
}
