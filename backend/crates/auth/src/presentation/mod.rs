//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthGateState, require_bearer_token};
pub use openapi::{ApiDoc, api_doc};
pub use router::{api_router, auth_router, protected_router};
