//! Server construction, middleware wiring and graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use exercise_tracker::Trace;
#[cfg(debug_assertions)]
use exercise_tracker::doc::ApiDoc;
use exercise_tracker::inbound::http::configure;
use exercise_tracker::inbound::http::health::{HealthState, live, ready};
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::middleware::build_cors;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Listener settings for [`create_server`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Empty allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(cors)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP listener, mark the process ready and arm graceful shutdown.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        bind_addr,
        cors_allowed_origins,
    } = config;

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            build_cors(&cors_allowed_origins),
        )
    })
    .disable_signals()
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    Ok(server)
}

/// Fail both health checks once `signal` resolves, then stop accepting connections
/// and let in-flight requests finish.
async fn drain_on(
    signal: impl Future<Output = ()>,
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) {
    signal.await;
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}

async fn ctrl_c() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                () = ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(error) => {
            warn!(%error, "SIGTERM handler unavailable");
            ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    ctrl_c().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use exercise_tracker::startup::{StoreBundle, build_http_state};
    use mockable::DefaultClock;
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn signal_fails_health_checks_and_stops_server() {
        let health_state = web::Data::new(HealthState::new());
        let store = StoreBundle::in_memory();
        let http_state = web::Data::new(build_http_state(&store, Arc::new(DefaultClock)));
        let server = HttpServer::new({
            let health_state = health_state.clone();
            move || build_app(health_state.clone(), http_state.clone(), build_cors(&[]))
        })
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind ephemeral port")
        .run();
        health_state.mark_ready();

        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        drain_on(std::future::ready(()), health_state.clone(), handle).await;

        assert!(!health_state.is_alive());
        assert!(!health_state.is_ready());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
