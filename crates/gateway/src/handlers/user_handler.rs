//! User handlers.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use common::{ApiResponse, AppError, AppResult, Created};
use domain::{
    user_not_found_message, CreateUser, UpdateUser, User, EMAIL_PATTERN, MIN_NAME_LENGTH,
    MSG_EMAIL_INVALID, MSG_NAME_REQUIRED,
};

use crate::extractors::{ValidatedJson, ValidationOrder};
use crate::state::AppState;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// User creation request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User display name
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    /// User email address
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
}

impl ValidationOrder for CreateUserRequest {
    const FIELDS: &'static [&'static str] = &["name", "email"];
}

impl TryFrom<CreateUserRequest> for CreateUser {
    type Error = AppError;

    fn try_from(request: CreateUserRequest) -> Result<Self, Self::Error> {
        let name = request
            .name
            .ok_or_else(|| AppError::validation(MSG_NAME_REQUIRED))?;
        let email = request
            .email
            .ok_or_else(|| AppError::validation(MSG_EMAIL_INVALID))?;

        Ok(CreateUser { name, email })
    }
}

/// User update request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    /// New email address
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
}

impl ValidationOrder for UpdateUserRequest {
    const FIELDS: &'static [&'static str] = &["name", "email"];
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(request: UpdateUserRequest) -> Self {
        UpdateUser {
            name: request.name,
            email: request.email,
        }
    }
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_NAME_LENGTH {
        return Err(validation_error("name_blank", MSG_NAME_REQUIRED));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(validation_error("email_invalid", MSG_EMAIL_INVALID));
    }
    Ok(())
}

/// Ids that are not UUIDs cannot name a stored user.
fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(user_not_found_message(raw)))
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users in creation order", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    Ok(ApiResponse::success(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<User>> {
    let user = state.user_service.get_user(parse_user_id(&id)?).await?;
    Ok(ApiResponse::success(user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Validation error or email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<User>> {
    let user = state.user_service.create_user(payload.try_into()?).await?;
    Ok(Created(ApiResponse::with_message(
        user,
        "User created successfully",
    )))
}

/// Update user; only supplied fields change
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, description = "Validation error or email already exists"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<ApiResponse<User>> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.update_user(id, payload.into()).await?;
    Ok(ApiResponse::with_message(user, "User updated successfully"))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.user_service.delete_user(parse_user_id(&id)?).await?;
    Ok(ApiResponse::message("User deleted successfully"))
}
