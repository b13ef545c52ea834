//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised against mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{ExerciseLog, UserRegistry};

/// Driving ports used by the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRegistry>,
    pub exercises: Arc<dyn ExerciseLog>,
}

impl HttpState {
    pub fn new(users: Arc<dyn UserRegistry>, exercises: Arc<dyn ExerciseLog>) -> Self {
        Self { users, exercises }
    }
}
