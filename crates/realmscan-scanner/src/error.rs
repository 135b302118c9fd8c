use realmscan_domain::{DomainError, Tenant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("region error: {0}")]
    Domain(#[from] DomainError),

    #[error("no candidate endpoints for tenant '{0}'")]
    NoCandidateEndpoints(Tenant),

    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("internal error: {0}")]
    Internal(String),
}
