//! Process startup: settings, store selection and service wiring.

mod config;
mod store;

pub use config::ServerSettings;
pub use store::{StartupError, StoreBundle, build_http_state, clear_store_on_startup, open_store};
