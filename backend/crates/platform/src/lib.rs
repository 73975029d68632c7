//! Platform Crate - Technical Infrastructure
//!
//! Domain-agnostic building blocks used by the auth crate:
//! - Password hashing (Argon2id, configurable cost, zeroized clear text)
//! - Cookie building and parsing
//! - Go-style duration strings for configuration (`15m`, `720h`)
//! - Secure random bytes

pub mod cookie;
pub mod crypto;
pub mod duration;
pub mod password;
