use serde::{Deserialize, Serialize};

/// Raw YAML representation of a realmscan settings file.
///
/// Every field is optional; absent fields keep the built-in value.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    pub client_id: Option<String>,
    /// Sent as the refresh token. Must be a value the provider will reject.
    pub refresh_token: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub default_region: Option<String>,
    /// Replaces the built-in catalog when present. Order is the `ALL` order.
    pub regions: Option<Vec<RawRegion>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawRegion {
    pub code: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}
