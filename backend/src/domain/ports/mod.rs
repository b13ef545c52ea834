//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound store adapters.
//! Driving ports (`UserRegistry`, `ExerciseLog`) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_log;
mod exercise_repository;
mod user_registry;
mod user_repository;

#[cfg(test)]
pub use exercise_log::MockExerciseLog;
pub use exercise_log::{
    ExerciseLog, ExerciseLogReport, FetchLogRequest, LogExerciseRequest, LoggedExercise,
};
#[cfg(test)]
pub use exercise_repository::MockExerciseRepository;
pub use exercise_repository::{ExercisePersistenceError, ExerciseRepository};
#[cfg(test)]
pub use user_registry::MockUserRegistry;
pub use user_registry::{RegisterUserRequest, UserRegistry};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
