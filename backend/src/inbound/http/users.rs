//! Users API handlers.
//!
//! ```text
//! POST /api/users {"username":"ada"}
//! GET /api/users
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;
use crate::domain::ports::RegisterUserRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::body::RequestBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Body for `POST /api/users`, as JSON or a urlencoded form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserBody {
    #[serde(default)]
    #[schema(example = "ada")]
    pub username: Option<String>,
}

/// User projection returned by the users endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            id: user.id().to_string(),
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body(
        content(
            (CreateUserBody = "application/json"),
            (CreateUserBody = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Missing or duplicate username", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: RequestBody<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let CreateUserBody { username } = body.into_inner();
    let user = state
        .users
        .register_user(RegisterUserRequest { username })
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// List every registered user in store order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use exercise_tracker::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests;
