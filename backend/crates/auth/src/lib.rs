//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Credentials, principal, value objects, repository trait
//! - `application/` - Use cases, token codec, configuration
//! - `infra/` - PostgreSQL and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, bearer gate, router
//!
//! ## Features
//! - Register/login with email + password
//! - Stateless HS256 token pairs: short-lived access token in the
//!   `Authorization` response header, long-lived refresh token in an
//!   HttpOnly cookie
//! - Refresh and logout endpoints
//! - Bearer gate for protected routes (`GET /profile`)
//! - OpenAPI document for every endpoint
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool
//! - Login failures never reveal whether the email exists
//! - Only HS256 is accepted; `none` and other algorithms are rejected
//! - No revocation store: a refresh token stays valid until it expires

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, BearerPolicy};
pub use error::{AuthError, AuthResult, ConfigError};
pub use infra::{memory::InMemoryCredentialRepository, postgres::PgCredentialRepository};
pub use presentation::handlers::AuthAppState;
pub use presentation::openapi::api_doc;
pub use presentation::router::api_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
