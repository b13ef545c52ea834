//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary. Domain types are described through the wrappers in
//! [`crate::inbound::http::schemas`].

use utoipa::OpenApi;

use crate::inbound::http::exercises::{
    ExerciseCreatedResponse, LogEntryResponse, LogExerciseBody, LogResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CreateUserBody, UserResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise tracker API",
        description = "Register users, log exercises and read filtered exercise histories."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::exercises::log_exercise,
        crate::inbound::http::exercises::get_exercise_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserBody,
        UserResponse,
        LogExerciseBody,
        ExerciseCreatedResponse,
        LogEntryResponse,
        LogResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User registration and listing"),
        (name = "exercises", description = "Exercise logging and history"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/users")]
    #[case("/api/users/{id}/exercises")]
    #[case("/api/users/{id}/logs")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_endpoint(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn error_schema_is_registered_under_domain_name() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.keys().any(|name| name.ends_with("Error")));
        assert!(schemas.contains_key("LogResponse"));
    }

    #[rstest]
    #[case("/api/users")]
    #[case("/api/users/{id}/exercises")]
    fn write_endpoints_accept_json_and_forms(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        let operation = doc.paths.paths[path].post.as_ref().expect("post operation");
        let body = operation.request_body.as_ref().expect("request body");
        assert!(body.content.contains_key("application/json"));
        assert!(body.content.contains_key("application/x-www-form-urlencoded"));
    }

    #[rstest]
    fn log_endpoint_documents_error_statuses() {
        let doc = ApiDoc::openapi();
        let operation = doc.paths.paths["/api/users/{id}/logs"]
            .get
            .as_ref()
            .expect("get operation");
        for status in ["400", "404", "500"] {
            assert!(operation.responses.responses.contains_key(status), "missing {status}");
        }
    }
}
