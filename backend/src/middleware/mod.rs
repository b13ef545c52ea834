//! Request middleware.

pub mod cors;
pub mod trace;

pub use cors::build_cors;
pub use trace::Trace;
