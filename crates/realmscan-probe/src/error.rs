use realmscan_domain::ProbeOutcome;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("invalid endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("tenant '{0}' cannot be used as a realm path segment")]
    InvalidTenant(String),

    #[error("internal probe error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProbeError::Timeout
        } else {
            ProbeError::Transport(e.to_string())
        }
    }
}

/// Every probe failure is an indeterminate outcome; none is ever read as
/// "not provisioned".
impl From<ProbeError> for ProbeOutcome {
    fn from(e: ProbeError) -> ProbeOutcome {
        ProbeOutcome::indeterminate(e.to_string())
    }
}
