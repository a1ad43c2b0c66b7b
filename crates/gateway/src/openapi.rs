//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::HealthStatus;
use crate::handlers::user_handler::{CreateUserRequest, UpdateUserRequest};
use domain::User;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        version = "0.1.0",
        description = "CRUD over an in-memory collection of users",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            User,
            CreateUserRequest,
            UpdateUserRequest,
            HealthStatus,
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints"),
        (name = "Health", description = "Liveness check"),
    )
)]
pub struct ApiDoc;
