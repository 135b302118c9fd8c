mod raw;
mod loader;
mod settings;
pub mod error;

pub use loader::{load_settings, load_tenants, parse_settings, parse_tenants};
pub use settings::{
    recommended_max_concurrency, Settings, DEFAULT_CLIENT_ID, DEFAULT_CONCURRENCY,
    DEFAULT_REFRESH_TOKEN, DEFAULT_REQUEST_TIMEOUT,
};
pub use error::ConfigError;
