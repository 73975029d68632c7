//! Full Name Value Object

use crate::error::{AuthError, AuthResult};

/// Display name given at registration. Trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn new(name: impl AsRef<str>) -> AuthResult<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(AuthError::MissingFields);
        }
        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for FullName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_trimmed() {
        assert_eq!(FullName::new("  Ana  ").unwrap().as_str(), "Ana");
    }

    #[test]
    fn test_full_name_empty() {
        assert!(matches!(FullName::new(""), Err(AuthError::MissingFields)));
        assert!(matches!(FullName::new(" \t"), Err(AuthError::MissingFields)));
    }
}
