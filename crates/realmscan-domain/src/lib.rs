mod catalog;
mod error;
mod tenant;
mod tests;
mod types;

pub use catalog::{EndpointResolver, Region, RegionCatalog, ALL_REGIONS, DEFAULT_REGION};
pub use error::DomainError;
pub use tenant::dedup_tenants;
pub use types::*;
