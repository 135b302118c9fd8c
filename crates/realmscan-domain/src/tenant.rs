use std::collections::HashSet;

use crate::types::Tenant;

/// Drop exact duplicates, keeping the first occurrence of each tenant.
///
/// Identifiers are compared byte-for-byte: `Acme` and `acme` are different
/// tenants.
pub fn dedup_tenants<I>(tenants: I) -> Vec<Tenant>
where
    I: IntoIterator<Item = Tenant>,
{
    let mut seen = HashSet::new();
    tenants
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
