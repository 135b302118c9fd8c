use std::sync::Arc;
use std::time::Duration;

use realmscan_domain::RegionCatalog;

/// Client id presented to the token endpoint.
pub const DEFAULT_CLIENT_ID: &str = "ast-app";

/// Refresh token sent with every probe. A single space is never a valid token.
pub const DEFAULT_REFRESH_TOKEN: &str = " ";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Tenant evaluations in flight when the caller does not choose a bound.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Operator-level settings for a scan run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub refresh_token: String,
    /// Upper bound on a single probe request, connect included.
    pub request_timeout: Duration,
    pub catalog: Arc<RegionCatalog>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            refresh_token: DEFAULT_REFRESH_TOKEN.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            catalog: Arc::new(RegionCatalog::builtin()),
        }
    }
}

/// Highest concurrency bound accepted for tenant evaluations on this host:
/// `min(32, cpus + 4)`.
pub fn recommended_max_concurrency() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus + 4).min(32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommended_max_is_bounded() {
        let max = recommended_max_concurrency();
        assert!(max >= 5);
        assert!(max <= 32);
    }

    #[test]
    fn defaults_use_builtin_catalog() {
        let s = Settings::default();
        assert_eq!(s.client_id, "ast-app");
        assert_eq!(s.refresh_token, " ");
        assert_eq!(s.catalog.default_region().as_str(), "US");
        assert_eq!(s.catalog.regions().len(), 7);
    }
}
