//! HTTP inbound adapter exposing the REST endpoints.

pub mod body;
pub mod error;
pub mod exercises;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` routes and extractor configuration.
///
/// ```
/// use actix_web::App;
/// use exercise_tracker::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::FormConfig::default().error_handler(error::form_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api")
                .service(users::create_user)
                .service(users::list_users)
                .service(exercises::log_exercise)
                .service(exercises::get_exercise_log),
        );
}
