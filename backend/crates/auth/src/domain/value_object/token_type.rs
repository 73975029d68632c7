//! Token Type Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Which endpoint a token is meant for. Carried in the `type` claim.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived, presented as a bearer credential
    #[display("access")]
    Access,
    /// Long-lived, only accepted by the refresh endpoint
    #[display("refresh")]
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}
