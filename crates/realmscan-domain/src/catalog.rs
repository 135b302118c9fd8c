use std::collections::HashSet;
use std::sync::Arc;

use crate::error::DomainError;
use crate::types::{Endpoint, RegionCode};

/// Region selector that expands to every region in the catalog.
pub const ALL_REGIONS: &str = "ALL";

/// Region used when the built-in catalog is asked for nothing in particular.
pub const DEFAULT_REGION: &str = "US";

const BUILTIN_REGIONS: &[(&str, &[&str])] = &[
    ("US", &["https://iam.checkmarx.net", "https://us.iam.checkmarx.net"]),
    ("EU", &["https://eu.iam.checkmarx.net", "https://eu-2.iam.checkmarx.net"]),
    ("DEU", &["https://deu.iam.checkmarx.net"]),
    ("ANZ", &["https://anz.iam.checkmarx.net"]),
    ("IND", &["https://ind.iam.checkmarx.net"]),
    ("SNG", &["https://sng.iam.checkmarx.net"]),
    ("UAE", &["https://mea.iam.checkmarx.net"]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub code: RegionCode,
    pub endpoints: Vec<Endpoint>,
}

/// Immutable region → endpoint table.
///
/// Region order is the order in which `ALL` expands. An endpoint may appear
/// under at most one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCatalog {
    default_region: RegionCode,
    regions: Vec<Region>,
}

impl RegionCatalog {
    pub fn new(default_region: RegionCode, regions: Vec<Region>) -> Result<Self, DomainError> {
        let mut codes = HashSet::new();
        let mut endpoints = HashSet::new();
        for region in &regions {
            if region.code.as_str().is_empty() || region.code.as_str() == ALL_REGIONS {
                return Err(DomainError::InvalidConfig(format!(
                    "'{}' is not a usable region code",
                    region.code
                )));
            }
            if !codes.insert(region.code.clone()) {
                return Err(DomainError::DuplicateRegion(region.code.to_string()));
            }
            for endpoint in &region.endpoints {
                if !endpoints.insert(endpoint.clone()) {
                    return Err(DomainError::InvalidConfig(format!(
                        "endpoint {} is listed under more than one region",
                        endpoint
                    )));
                }
            }
        }
        if !codes.contains(&default_region) {
            return Err(DomainError::MissingDefaultRegion(default_region.to_string()));
        }
        Ok(Self { default_region, regions })
    }

    /// The production deployments, defaulting to `US`.
    pub fn builtin() -> Self {
        let regions = BUILTIN_REGIONS
            .iter()
            .map(|(code, urls)| Region {
                code: RegionCode::new(code),
                endpoints: urls.iter().map(|u| Endpoint::new(*u)).collect(),
            })
            .collect();
        Self {
            default_region: RegionCode::new(DEFAULT_REGION),
            regions,
        }
    }

    pub fn default_region(&self) -> &RegionCode {
        &self.default_region
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, code: &RegionCode) -> Option<&Region> {
        self.regions.iter().find(|r| &r.code == code)
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Maps requested region codes to the endpoints that should be probed.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    catalog: Arc<RegionCatalog>,
}

impl EndpointResolver {
    pub fn new(catalog: Arc<RegionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// Resolve region codes (case-insensitive, `ALL` allowed) to a
    /// deduplicated endpoint list in first-seen order.
    ///
    /// An empty request resolves the catalog's default region. Any code the
    /// catalog does not know fails the whole call.
    pub fn resolve<S: AsRef<str>>(&self, regions: &[S]) -> Result<Vec<Endpoint>, DomainError> {
        let requested: Vec<RegionCode> = if regions.is_empty() {
            vec![self.catalog.default_region.clone()]
        } else {
            regions.iter().map(RegionCode::new).collect()
        };

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for code in &requested {
            let selected: Vec<&Region> = if code.as_str() == ALL_REGIONS {
                self.catalog.regions.iter().collect()
            } else {
                let region = self
                    .catalog
                    .get(code)
                    .ok_or_else(|| DomainError::UnknownRegion(code.to_string()))?;
                vec![region]
            };
            for region in selected {
                for endpoint in &region.endpoints {
                    if seen.insert(endpoint.clone()) {
                        out.push(endpoint.clone());
                    }
                }
            }
        }
        Ok(out)
    }
}
