use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────────────

/// Tenant identifier. Case-sensitive; never normalised.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tenant(pub String);

impl Tenant {
    pub fn new(s: impl Into<String>) -> Self {
        Tenant(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tenant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base URL of one identity-provider deployment, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        Endpoint(s.trim().trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upper-cased region code such as `US` or `EU`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(s: impl AsRef<str>) -> Self {
        RegionCode(s.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Enums ─────────────────────────────────────────────────────────────────────

/// How probe outcomes for one tenant are folded into a tenant result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Stop at the first endpoint that reports the realm.
    #[default]
    FirstMatch,
    /// Wait for every endpoint and keep all that report the realm.
    Exhaustive,
}

impl std::fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationMode::FirstMatch => write!(f, "first-match"),
            AggregationMode::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

/// Classification of one (endpoint, tenant) probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The realm does not exist on this endpoint.
    NotProvisioned,
    /// The realm exists (normally: it rejected our deliberately invalid credential).
    Provisioned,
    /// Anything else. Never counted as a match.
    Indeterminate { reason: String },
}

impl ProbeOutcome {
    pub fn indeterminate(reason: impl Into<String>) -> Self {
        ProbeOutcome::Indeterminate { reason: reason.into() }
    }

    pub fn is_provisioned(&self) -> bool {
        matches!(self, ProbeOutcome::Provisioned)
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeOutcome::NotProvisioned => write!(f, "not provisioned"),
            ProbeOutcome::Provisioned => write!(f, "provisioned"),
            ProbeOutcome::Indeterminate { reason } => write!(f, "indeterminate: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Enabled,
    Disabled,
    /// The tenant could not be checked at all.
    Unknown,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Enabled => write!(f, "Enabled"),
            ReportStatus::Disabled => write!(f, "Disabled"),
            ReportStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Separator used when several matched endpoints share one report column.
pub const ENDPOINT_SEPARATOR: &str = "|";

/// Placeholder rendered when a tenant matched no endpoint.
pub const NO_ENDPOINT: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantResult {
    pub tenant: Tenant,
    pub enabled: bool,
    /// Endpoints that reported the realm, in resolver order.
    pub matched_endpoints: Vec<Endpoint>,
    /// Set when the tenant could not be evaluated at all.
    pub error: Option<String>,
}

impl TenantResult {
    pub fn new(tenant: Tenant, matched_endpoints: Vec<Endpoint>) -> Self {
        Self {
            tenant,
            enabled: !matched_endpoints.is_empty(),
            matched_endpoints,
            error: None,
        }
    }

    pub fn failed(tenant: Tenant, error: impl Into<String>) -> Self {
        Self {
            tenant,
            enabled: false,
            matched_endpoints: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn status(&self) -> ReportStatus {
        if self.enabled {
            ReportStatus::Enabled
        } else if self.error.is_some() {
            ReportStatus::Unknown
        } else {
            ReportStatus::Disabled
        }
    }
}

/// One line of the final report: Tenant, Status, Regional URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub tenant: Tenant,
    pub status: ReportStatus,
    pub endpoints: Vec<Endpoint>,
}

impl ReportRow {
    /// Matched endpoints joined with `|`, or `N/A` when there are none.
    pub fn regional_url(&self) -> String {
        if self.endpoints.is_empty() {
            return NO_ENDPOINT.to_string();
        }
        self.endpoints
            .iter()
            .map(Endpoint::as_str)
            .collect::<Vec<_>>()
            .join(ENDPOINT_SEPARATOR)
    }
}

impl From<&TenantResult> for ReportRow {
    fn from(r: &TenantResult) -> ReportRow {
        ReportRow {
            tenant: r.tenant.clone(),
            status: r.status(),
            endpoints: r.matched_endpoints.clone(),
        }
    }
}
