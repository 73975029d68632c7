//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use platform::password::PasswordHasher;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_codec::{TokenCodec, TokenPair};
use crate::application::{
    GetProfileUseCase, LoginInput, LoginUseCase, RefreshUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::CredentialRepository;
use crate::error::{AuthError, AuthResult, ConfigError};
use crate::presentation::dto::{LoginRequest, ProfileResponse, RegisterRequest, StatusResponse};
use crate::presentation::middleware::AuthGateState;

/// Seconds until the access token in `Authorization` expires
pub const X_EXPIRES_IN: HeaderName = HeaderName::from_static("x-expires-in");
/// Informational; always `access`
pub const X_TOKEN_TYPE: HeaderName = HeaderName::from_static("x-token-type");

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub codec: Arc<TokenCodec>,
    pub hasher: Arc<PasswordHasher>,
}

impl<R> AuthAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    /// Validate the config and build the codec and hasher it describes
    pub fn new(repo: R, config: AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let codec = TokenCodec::from_config(&config)?;
        let hasher = config.password_hasher()?;

        Ok(Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            codec: Arc::new(codec),
            hasher: Arc::new(hasher),
        })
    }

    /// State for the bearer gate in front of protected routes
    pub fn gate(&self) -> AuthGateState {
        AuthGateState {
            codec: self.codec.clone(),
            policy: self.config.bearer_policy,
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = StatusResponse,
            headers(
                ("authorization" = String, description = "`Bearer <access token>`"),
                ("x-expires-in" = u64, description = "Seconds until the access token expires"),
                ("x-token-type" = String, description = "Always `access`"),
                ("set-cookie" = String, description = "HttpOnly refresh token cookie")
            )
        ),
        (status = 400, description = "Missing or invalid fields, or malformed JSON"),
        (status = 409, description = "Email already registered"),
        (status = 503, description = "Credential store timed out")
    )
)]
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Response>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(invalid_payload)?;

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        })
        .await?;

    token_response(
        &state.config,
        StatusCode::CREATED,
        &output.tokens,
        StatusResponse::REGISTERED,
    )
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = StatusResponse,
            headers(
                ("authorization" = String, description = "`Bearer <access token>`"),
                ("x-expires-in" = u64, description = "Seconds until the access token expires"),
                ("x-token-type" = String, description = "Always `access`"),
                ("set-cookie" = String, description = "HttpOnly refresh token cookie")
            )
        ),
        (status = 400, description = "Malformed JSON"),
        (status = 401, description = "Invalid credentials"),
        (status = 503, description = "Credential store timed out")
    )
)]
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Response>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(invalid_payload)?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    token_response(
        &state.config,
        StatusCode::OK,
        &output.tokens,
        StatusResponse::LOGGED_IN,
    )
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    params(
        ("refresh_token" = String, Cookie, description = "Refresh token set by register or login")
    ),
    responses(
        (status = 200, description = "New token pair", body = StatusResponse,
            headers(
                ("authorization" = String, description = "`Bearer <access token>`"),
                ("x-expires-in" = u64, description = "Seconds until the access token expires"),
                ("x-token-type" = String, description = "Always `access`"),
                ("set-cookie" = String, description = "HttpOnly refresh token cookie")
            )
        ),
        (status = 401, description = "Missing, invalid or non-refresh token")
    )
)]
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.refresh_cookie_name);

    let output = RefreshUseCase::new(state.codec.clone()).execute(token.as_deref())?;

    token_response(
        &state.config,
        StatusCode::OK,
        &output.tokens,
        StatusResponse::REFRESHED,
    )
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Stateless: nothing to revoke, the browser is told to drop the cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Refresh cookie cleared", body = StatusResponse,
            headers(("set-cookie" = String, description = "Expired refresh token cookie"))
        )
    )
)]
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.config.refresh_cookie().build_delete_cookie();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(StatusResponse::LOGGED_OUT),
    )
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /api/profile
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 400, description = "Token subject is not an assigned id"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User no longer exists"),
        (status = 503, description = "Credential store timed out")
    )
)]
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
) -> AuthResult<Json<ProfileResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone(), state.config.clone());
    let credential = use_case.execute(principal.user_id).await?;

    Ok(Json(ProfileResponse::from(credential)))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn invalid_payload(rejection: JsonRejection) -> AuthError {
    AuthError::InvalidPayload(rejection.body_text())
}

/// Access token in headers, refresh token in the cookie, status in the body
fn token_response(
    config: &AuthConfig,
    status: StatusCode,
    tokens: &TokenPair,
    body: StatusResponse,
) -> AuthResult<Response> {
    let now = Utc::now();

    let bearer = HeaderValue::from_str(&format!("Bearer {}", tokens.access.token))
        .map_err(|e| AuthError::Internal(format!("access token header: {e}")))?;
    let cookie = config
        .refresh_cookie()
        .build_set_cookie(&tokens.refresh.token, Some(tokens.refresh.expires_at));
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| AuthError::Internal(format!("refresh cookie header: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, bearer);
    headers.insert(X_EXPIRES_IN, HeaderValue::from(tokens.access.expires_in(now)));
    headers.insert(X_TOKEN_TYPE, HeaderValue::from_static("access"));
    headers.insert(header::SET_COOKIE, cookie);

    Ok((status, headers, Json(body)).into_response())
}
