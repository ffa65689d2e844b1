//! HTTP handlers for login and registration

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, UnauthorizedResponse,
    },
    Envelope, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, RegisterRequest, Role, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the auth API
#[derive(OpenApi)]
#[openapi(
    paths(login, register_user, register_admin),
    components(
        schemas(LoginRequest, RegisterRequest, UserResponse, Role, Envelope<UserResponse>),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Login and account registration")
    )
)]
pub struct ApiDoc;

/// Shared state for the auth routes.
pub struct AuthState<R: UserRepository> {
    service: Arc<UserService<R>>,
    admin_token: Option<String>,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            admin_token: self.admin_token.clone(),
        }
    }
}

/// Create the auth router.
///
/// `admin_token` guards `POST /admin`: requests must present the same
/// value in the `x-admin-token` header. When it is `None` the endpoint
/// refuses every request.
pub fn router<R: UserRepository + 'static>(
    service: UserService<R>,
    admin_token: Option<String>,
) -> Router {
    let state = AuthState {
        service: Arc::new(service),
        admin_token,
    };

    Router::new()
        .route("/auth", post(login))
        .route("/user", post(register_user))
        .route("/admin", post(register_admin))
        .with_state(state)
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = Envelope<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<Envelope<UserResponse>>> {
    let user = state.service.login(input).await?;
    Ok(Json(Envelope::new(user)))
}

/// Register a standard account
#[utoipa::path(
    post,
    path = "/user",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = Envelope<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_user<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.register(input, Role::User).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(user))))
}

/// Register an admin account (requires the `x-admin-token` header)
#[utoipa::path(
    post,
    path = "/admin",
    tag = "Auth",
    request_body = RegisterRequest,
    params(
        ("x-admin-token" = String, Header, description = "Admin provisioning token")
    ),
    responses(
        (status = 201, description = "Admin account created", body = Envelope<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_admin<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    authorize_admin(&state, &headers)?;

    let user = state.service.register(input, Role::Admin).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(user))))
}

fn authorize_admin<R: UserRepository>(
    state: &AuthState<R>,
    headers: &HeaderMap,
) -> UserResult<()> {
    // Refuse outright when no token is configured
    let expected = state.admin_token.as_deref().ok_or_else(|| {
        UserError::Forbidden("Admin registration is not enabled".to_string())
    })?;

    let provided = headers
        .get("x-admin-token")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| UserError::Forbidden("Admin token required".to_string()))?;

    if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        return Err(UserError::Forbidden("Invalid admin token".to_string()));
    }

    Ok(())
}

/// Byte comparison without early exit, so mismatch position does not
/// affect timing. Length still short-circuits.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
