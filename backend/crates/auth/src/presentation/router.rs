//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::CredentialRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer_token;

/// Session endpoints, meant to be nested under `/auth`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .with_state(state)
}

/// Routes behind the bearer gate
pub fn protected_router<R>(state: AuthAppState<R>) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/profile", get(handlers::profile::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.gate(),
            require_bearer_token,
        ))
        .with_state(state)
}

/// Everything this crate serves, meant to be nested under `/api`
pub fn api_router<R>(state: AuthAppState<R>) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .nest("/auth", auth_router(state.clone()))
        .merge(protected_router(state))
}
