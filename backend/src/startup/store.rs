//! Backing store selection and wiring of the domain services.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{ExerciseRepository, UserRepository};
use crate::domain::{ExerciseLogService, UserRegistryService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselExerciseRepository, DieselUserRepository, InMemoryStore, MigrationError,
    PoolConfig, PoolError, run_migrations,
};

use super::ServerSettings;

/// Errors raised while opening the configured store.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Repository handles shared by the domain services.
#[derive(Clone)]
pub struct StoreBundle {
    pub users: Arc<dyn UserRepository>,
    pub exercises: Arc<dyn ExerciseRepository>,
}

impl StoreBundle {
    /// Both ports backed by one process-local store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            exercises: store,
        }
    }

    /// Diesel repositories sharing one connection pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            exercises: Arc::new(DieselExerciseRepository::new(pool)),
        }
    }
}

/// Open PostgreSQL when a URL is configured, otherwise the in-memory store.
pub async fn open_store(settings: &ServerSettings) -> Result<StoreBundle, StartupError> {
    let Some(url) = settings.database_url() else {
        info!("no database url configured; using in-memory store");
        return Ok(StoreBundle::in_memory());
    };

    run_migrations(url).await?;
    let pool = DbPool::new(PoolConfig::new(url)).await?;
    info!("connected to postgres");
    Ok(StoreBundle::postgres(pool))
}

/// Remove every user and exercise. Failures are logged and ignored.
pub async fn clear_store_on_startup(store: &StoreBundle) {
    match store.exercises.delete_all().await {
        Ok(removed) => info!(removed, "cleared exercises"),
        Err(error) => warn!(%error, "failed to clear exercises"),
    }
    match store.users.delete_all().await {
        Ok(removed) => info!(removed, "cleared users"),
        Err(error) => warn!(%error, "failed to clear users"),
    }
}

/// Build the HTTP adapter state on top of `store`.
pub fn build_http_state(store: &StoreBundle, clock: Arc<dyn Clock>) -> HttpState {
    let registry = UserRegistryService::new(store.users.clone());
    let log = ExerciseLogService::new(store.users.clone(), store.exercises.clone(), clock);
    HttpState::new(Arc::new(registry), Arc::new(log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        ExerciseLog, FetchLogRequest, LogExerciseRequest, RegisterUserRequest, UserRegistry,
    };
    use crate::domain::{LogQueryParams, User};
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bundle() -> StoreBundle {
        StoreBundle::in_memory()
    }

    async fn register(state: &HttpState, name: &str) -> User {
        state
            .users
            .register_user(RegisterUserRequest {
                username: Some(name.to_owned()),
            })
            .await
            .expect("register user")
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_ports_share_records(bundle: StoreBundle) {
        let state = build_http_state(&bundle, Arc::new(DefaultClock));
        let user = register(&state, "alice").await;

        state
            .exercises
            .log_exercise(LogExerciseRequest {
                user_id: user.id().to_string(),
                description: Some("run".to_owned()),
                duration: Some("30".to_owned()),
                date: Some("2024-01-01".to_owned()),
            })
            .await
            .expect("log exercise");

        let report = state
            .exercises
            .fetch_log(FetchLogRequest {
                user_id: user.id().to_string(),
                params: LogQueryParams::default(),
            })
            .await
            .expect("fetch log");
        assert_eq!(report.count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn clearing_removes_users_and_exercises(bundle: StoreBundle) {
        let state = build_http_state(&bundle, Arc::new(DefaultClock));
        let user = register(&state, "bob").await;
        state
            .exercises
            .log_exercise(LogExerciseRequest {
                user_id: user.id().to_string(),
                description: Some("swim".to_owned()),
                duration: Some("45".to_owned()),
                date: None,
            })
            .await
            .expect("log exercise");

        clear_store_on_startup(&bundle).await;

        assert!(state.users.list_users().await.expect("list").is_empty());
        assert_eq!(
            bundle.exercises.delete_all().await.expect("delete"),
            0,
            "exercises should already be gone"
        );
        register(&state, "bob").await;
    }

    #[rstest]
    #[tokio::test]
    async fn missing_url_opens_in_memory_store() {
        let settings = ServerSettings {
            host: None,
            port: None,
            database_url: None,
            clear_on_startup: false,
            cors_allowed_origins: None,
        };
        let store = open_store(&settings).await.expect("open store");
        assert_eq!(store.users.list().await.expect("list").len(), 0);
    }
}
