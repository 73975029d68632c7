//! Password Hashing and Verification
//!
//! - Argon2id hashing with a configurable cost (memory-hard, OWASP default)
//! - Optional application-wide pepper
//! - Clear-text passwords are NFKC-normalised, redacted in `Debug` and
//!   zeroized on drop
//!
//! Verification never errors on a mismatch or on a corrupt stored hash; it
//! answers `false`.

use std::fmt;

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Cost
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB (m)
    pub memory_kib: u32,
    /// Passes over memory (t)
    pub iterations: u32,
    /// Lanes (p)
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommendation: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashCost {
    /// Cheapest parameters argon2 accepts. Tests and local development only.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Cost parameters rejected by argon2
    #[error("Invalid password hash cost: {0}")]
    InvalidCost(String),

    /// Hashing operation failed (e.g. memory allocation)
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization.
///
/// Not `Clone`, and `Debug` prints `[REDACTED]`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Take ownership of user input. The input is NFKC-normalised so the
    /// same password typed on different keyboards hashes identically; the
    /// original buffer is wiped.
    pub fn new(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(pepper) = pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2 hash in PHC string format (algorithm, version, params, salt,
/// digest).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored value without parsing it. A corrupt value simply never
    /// verifies.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self { hash: s.into() }
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id hasher bound to a cost and an optional pepper.
///
/// Cheap to clone; holds no argon2 state between calls.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    pepper: Option<Zeroizing<Vec<u8>>>,
}

impl PasswordHasher {
    pub fn new(cost: HashCost, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))?;

        Ok(Self {
            params,
            pepper: pepper.map(Zeroizing::new),
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh 128-bit salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let input = password.peppered(self.pepper.as_deref().map(Vec::as_slice));
        let salt = SaltString::generate(OsRng);

        let hash = self
            .argon2()
            .hash_password(&input, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify against a stored hash. The cost embedded in the PHC string is
    /// used, so hashes made under an older cost still verify.
    pub fn verify(&self, hashed: &HashedPassword, password: &ClearTextPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return false;
        };
        let input = password.peppered(self.pepper.as_deref().map(Vec::as_slice));

        // Digest comparison inside argon2 is constant-time
        self.argon2().verify_password(&input, &parsed).is_ok()
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", &self.params)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher(pepper: Option<&[u8]>) -> PasswordHasher {
        PasswordHasher::new(HashCost::minimal(), pepper.map(<[u8]>::to_vec)).unwrap()
    }

    fn pw(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string())
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher(None);
        let hashed = hasher.hash(&pw("secret1")).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hasher.verify(&hashed, &pw("secret1")));
        assert!(!hasher.verify(&hashed, &pw("secret2")));
    }

    #[test]
    fn test_salt_is_random() {
        let hasher = hasher(None);
        let a = hasher.hash(&pw("same")).unwrap();
        let b = hasher.hash(&pw("same")).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_pepper_must_match() {
        let peppered = hasher(Some(b"pepper"));
        let hashed = peppered.hash(&pw("secret1")).unwrap();

        assert!(peppered.verify(&hashed, &pw("secret1")));
        assert!(!hasher(None).verify(&hashed, &pw("secret1")));
        assert!(!hasher(Some(b"other")).verify(&hashed, &pw("secret1")));
    }

    #[test]
    fn test_verify_corrupt_hash_is_false() {
        let hasher = hasher(None);
        assert!(!hasher.verify(&HashedPassword::from_stored("not-a-hash"), &pw("x")));
    }

    #[test]
    fn test_verify_uses_cost_from_hash() {
        let cheap = hasher(None);
        let hashed = cheap.hash(&pw("secret1")).unwrap();
        let other = PasswordHasher::new(
            HashCost {
                memory_kib: 16,
                iterations: 2,
                parallelism: 1,
            },
            None,
        )
        .unwrap();
        assert!(other.verify(&hashed, &pw("secret1")));
    }

    #[test]
    fn test_invalid_cost() {
        let cost = HashCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            PasswordHasher::new(cost, None),
            Err(PasswordHashError::InvalidCost(_))
        ));
    }

    #[test]
    fn test_nfkc_normalization() {
        let hasher = hasher(None);
        // U+FF41 FULLWIDTH LATIN SMALL LETTER A normalises to 'a'
        let hashed = hasher.hash(&pw("\u{ff41}bc")).unwrap();
        assert!(hasher.verify(&hashed, &pw("abc")));
    }

    #[test]
    fn test_debug_is_redacted() {
        assert_eq!(format!("{:?}", pw("hunter2")), "ClearTextPassword(\"[REDACTED]\")");
        let debug = format!("{:?}", hasher(Some(b"pepper")));
        assert!(!debug.contains("pepper\""));
        assert!(debug.contains("[REDACTED]"));
    }
}
