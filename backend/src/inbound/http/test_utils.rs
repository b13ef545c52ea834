//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::App;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{ExerciseLogService, UserRegistryService};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::InMemoryStore;

/// Clock pinned to 2024-03-09T12:00:00Z.
pub struct FixedClock;

impl FixedClock {
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
            .single()
            .expect("fixed timestamp")
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Self::now().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Self::now()
    }
}

/// HTTP state backed by a fresh in-memory store and [`FixedClock`].
pub fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::new(
        Arc::new(UserRegistryService::new(store.clone())),
        Arc::new(ExerciseLogService::new(
            store.clone(),
            store,
            Arc::new(FixedClock),
        )),
    )
}

/// App wired with `state` and the production route table.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}
