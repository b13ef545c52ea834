//! Cross-origin resource sharing policy.
//!
//! Browsers on other origins call the API directly, so every route carries
//! CORS headers. With no configured origins any origin is allowed and
//! `access-control-allow-origin: *` is sent.

use actix_cors::Cors;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware for `allowed_origins`.
///
/// An empty list allows every origin.
///
/// ```
/// use actix_web::App;
/// use exercise_tracker::middleware::cors::build_cors;
///
/// let app = App::new().wrap(build_cors(&[]));
/// ```
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(PREFLIGHT_MAX_AGE_SECS);
    if allowed_origins.is_empty() {
        return cors.allow_any_origin().send_wildcard();
    }
    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
