use async_trait::async_trait;
use realmscan_domain::{Endpoint, ProbeOutcome, Tenant};

/// One classification attempt against one endpoint for one tenant.
///
/// Implementations issue at most one request per call and never retry.
/// Failures are reported as [`ProbeOutcome::Indeterminate`], so the call
/// itself cannot fail.
#[async_trait]
pub trait RealmProbe: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn probe(&self, endpoint: &Endpoint, tenant: &Tenant) -> ProbeOutcome;
}
