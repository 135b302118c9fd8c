use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown region '{0}'")]
    UnknownRegion(String),

    #[error("duplicate region '{0}' in catalog")]
    DuplicateRegion(String),

    #[error("default region '{0}' is not in the catalog")]
    MissingDefaultRegion(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
