//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod deadline;
pub mod get_profile;
pub mod login;
pub mod password;
pub mod refresh;
pub mod register;
pub mod token_codec;

// Re-exports
pub use config::{AuthConfig, BearerPolicy};
pub use get_profile::GetProfileUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token_codec::{IssuedToken, TokenClaims, TokenCodec, TokenPair};
