use std::time::Duration;

use async_trait::async_trait;
use realmscan_domain::{Endpoint, ProbeOutcome, Tenant};
use reqwest::Url;
use tracing::debug;

use crate::classify::classify;
use crate::error::ProbeError;
use crate::probe::RealmProbe;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Static request parameters shared by every probe of a run.
#[derive(Debug, Clone)]
pub struct HttpProbeConfig {
    pub client_id: String,
    /// Deliberately invalid; a real credential must never be sent.
    pub refresh_token: String,
    pub timeout: Duration,
}

// ── HttpRealmProbe ────────────────────────────────────────────────────────────

/// Probes a realm with a refresh-token grant against the OpenID Connect token
/// endpoint and classifies the response.
#[derive(Debug, Clone)]
pub struct HttpRealmProbe {
    config: HttpProbeConfig,
    client: reqwest::Client,
}

impl HttpRealmProbe {
    pub fn new(config: HttpProbeConfig) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProbeError::Internal(format!("building HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    /// `{endpoint}/auth/realms/{tenant}/protocol/openid-connect/token`, with the
    /// tenant encoded as a single path segment. Empty and dot-segment tenants
    /// are refused since the URL parser would drop or resolve them.
    pub fn token_url(endpoint: &Endpoint, tenant: &Tenant) -> Result<Url, ProbeError> {
        if matches!(tenant.as_str(), "" | "." | "..") {
            return Err(ProbeError::InvalidTenant(tenant.to_string()));
        }
        let invalid = |message: String| ProbeError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message,
        };
        let mut url = Url::parse(endpoint.as_str()).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend([
                "auth",
                "realms",
                tenant.as_str(),
                "protocol",
                "openid-connect",
                "token",
            ]);
        Ok(url)
    }

    async fn exchange(&self, endpoint: &Endpoint, tenant: &Tenant) -> Result<ProbeOutcome, ProbeError> {
        let url = Self::token_url(endpoint, tenant)?;
        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", self.config.refresh_token.as_str()),
        ];

        let resp = self.client.post(url).form(&form).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(classify(status, &body))
    }
}

#[async_trait]
impl RealmProbe for HttpRealmProbe {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn probe(&self, endpoint: &Endpoint, tenant: &Tenant) -> ProbeOutcome {
        let outcome = match self.exchange(endpoint, tenant).await {
            Ok(outcome) => outcome,
            Err(e) => e.into(),
        };
        debug!(tenant = %tenant, endpoint = %endpoint, outcome = %outcome, "probe finished");
        outcome
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
