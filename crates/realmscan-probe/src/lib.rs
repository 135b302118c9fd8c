pub mod classify;
pub mod error;
pub mod http;
pub mod probe;

pub use classify::classify;
pub use error::ProbeError;
pub use http::{HttpProbeConfig, HttpRealmProbe};
pub use probe::RealmProbe;
