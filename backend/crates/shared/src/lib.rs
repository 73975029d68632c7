//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - the unified HTTP-facing error ([`error::app_error::AppError`])
//! - the error classification ([`error::kind::ErrorKind`])
//! - typed integer identifiers ([`id::Id`])

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
