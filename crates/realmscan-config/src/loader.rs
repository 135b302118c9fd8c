use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use realmscan_domain::{dedup_tenants, Endpoint, Region, RegionCatalog, RegionCode, Tenant};
use tracing::debug;

use crate::error::ConfigError;
use crate::raw::{RawRegion, RawSettings};
use crate::settings::Settings;

/// Load settings from a YAML file. Fields absent from the file keep their
/// built-in values.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!("Loading settings from {}", path.display());
    parse_settings(&content, path)
}

/// Parse settings YAML. `path` is only used in error messages.
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings, ConfigError> {
    // An empty document deserializes as unit, not as an empty mapping.
    let raw: RawSettings = if content.trim().is_empty() {
        RawSettings::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| ConfigError::YamlParse {
            path: path.display().to_string(),
            source: e,
        })?
    };
    convert_settings(raw, path)
}

fn convert_settings(raw: RawSettings, path: &Path) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Some(client_id) = raw.client_id {
        if client_id.trim().is_empty() {
            return Err(conversion(path, "client_id must not be empty"));
        }
        settings.client_id = client_id;
    }
    if let Some(token) = raw.refresh_token {
        settings.refresh_token = token;
    }
    if let Some(secs) = raw.request_timeout_secs {
        if secs == 0 {
            return Err(conversion(path, "request_timeout_secs must be at least 1"));
        }
        settings.request_timeout = Duration::from_secs(secs);
    }

    settings.catalog = Arc::new(convert_catalog(raw.regions, raw.default_region, path)?);
    Ok(settings)
}

fn convert_catalog(
    regions: Option<Vec<RawRegion>>,
    default_region: Option<String>,
    path: &Path,
) -> Result<RegionCatalog, ConfigError> {
    let builtin = RegionCatalog::builtin();
    let custom = regions.is_some();
    let regions = match regions {
        Some(raw) => raw
            .into_iter()
            .map(|r| convert_region(r, path))
            .collect::<Result<Vec<_>, _>>()?,
        None => builtin.regions().to_vec(),
    };
    if regions.is_empty() {
        return Err(conversion(path, "regions must list at least one region"));
    }

    // A custom catalog without an explicit default defaults to its first region.
    let default_region = match default_region {
        Some(code) => RegionCode::new(code),
        None if custom => regions[0].code.clone(),
        None => builtin.default_region().clone(),
    };

    RegionCatalog::new(default_region, regions).map_err(|e| ConfigError::Domain {
        path: path.display().to_string(),
        source: e,
    })
}

fn convert_region(raw: RawRegion, path: &Path) -> Result<Region, ConfigError> {
    let endpoints = raw
        .endpoints
        .iter()
        .map(|url| parse_endpoint(url, &raw.code, path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Region {
        code: RegionCode::new(&raw.code),
        endpoints,
    })
}

fn parse_endpoint(url: &str, region: &str, path: &Path) -> Result<Endpoint, ConfigError> {
    let trimmed = url.trim();
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(conversion(
            path,
            format!("endpoint '{}' in region '{}' is not an http(s) URL", url, region),
        ));
    }
    Ok(Endpoint::new(trimmed))
}

fn conversion(path: &Path, message: impl Into<String>) -> ConfigError {
    ConfigError::Conversion {
        path: path.display().to_string(),
        message: message.into(),
    }
}

// ── Tenant source ─────────────────────────────────────────────────────────────

/// Read a tenant list: one identifier per line.
pub fn load_tenants(path: &Path) -> Result<Vec<Tenant>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let tenants = parse_tenants(&content);
    debug!("Loaded {} tenants from {}", tenants.len(), path.display());
    Ok(tenants)
}

/// Trim each line, skip blanks and `#` comments, drop repeats (first wins).
pub fn parse_tenants(content: &str) -> Vec<Tenant> {
    dedup_tenants(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Tenant::new),
    )
}
