use std::collections::HashSet;
use std::sync::Arc;

use realmscan_domain::{dedup_tenants, AggregationMode, Endpoint, EndpointResolver, Tenant, TenantResult};
use realmscan_probe::RealmProbe;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::error::ScanError;
use crate::evaluate::{evaluate, TenantEvaluation};
use crate::report::ScanIssue;

/// Raw batch output, before collation.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Endpoints every tenant was probed against, in resolver order.
    pub endpoints: Vec<Endpoint>,
    /// One result per distinct tenant, in completion order.
    pub results: Vec<TenantResult>,
    pub issues: Vec<ScanIssue>,
}

/// Evaluate every tenant against the endpoints of `regions`, at most
/// `concurrency` tenants at a time.
///
/// Only region resolution and a zero concurrency bound fail the run. A tenant
/// that cannot be evaluated is kept as a failed [`TenantResult`] and a
/// [`ScanIssue::TenantFailed`], so every requested tenant is accounted for.
pub async fn run<S: AsRef<str>>(
    probe: Arc<dyn RealmProbe>,
    resolver: &EndpointResolver,
    tenants: Vec<Tenant>,
    regions: &[S],
    mode: AggregationMode,
    concurrency: usize,
) -> Result<ScanOutcome, ScanError> {
    if concurrency == 0 {
        return Err(ScanError::InvalidConcurrency);
    }

    let tenants = dedup_tenants(tenants);
    let endpoints: Arc<[Endpoint]> = resolver.resolve(regions)?.into();
    info!(
        tenants = tenants.len(),
        endpoints = endpoints.len(),
        concurrency,
        mode = %mode,
        probe = probe.name(),
        "Evaluating tenants"
    );

    let permits = Arc::new(Semaphore::new(concurrency));
    let mut evaluations = JoinSet::new();
    for tenant in &tenants {
        let probe = probe.clone();
        let endpoints = endpoints.clone();
        let permits = permits.clone();
        let tenant = tenant.clone();
        evaluations.spawn(async move {
            let result = match permits.acquire_owned().await {
                Ok(_permit) => evaluate(probe, &tenant, &endpoints, mode).await,
                Err(e) => Err(ScanError::Internal(format!("concurrency limiter closed: {}", e))),
            };
            (tenant, result)
        });
    }

    let mut results = Vec::with_capacity(tenants.len());
    let mut issues = Vec::new();
    let mut finished = HashSet::new();

    while let Some(joined) = evaluations.join_next().await {
        match joined {
            Ok((tenant, Ok(TenantEvaluation { result, failures }))) => {
                debug!(tenant = %tenant, enabled = result.enabled, "Finished checking tenant");
                issues.extend(failures.into_iter().map(|f| ScanIssue::ProbeIndeterminate {
                    tenant: tenant.clone(),
                    endpoint: f.endpoint,
                    reason: f.reason,
                }));
                finished.insert(tenant);
                results.push(result);
            }
            Ok((tenant, Err(e))) => {
                warn!(tenant = %tenant, error = %e, "Tenant evaluation failed");
                record_failure(&mut results, &mut issues, tenant.clone(), e.to_string());
                finished.insert(tenant);
            }
            Err(e) => {
                // The tenant is recovered from `finished` once the set drains.
                error!(error = %e, "Tenant evaluation task failed");
            }
        }
    }

    for tenant in tenants.into_iter().filter(|t| !finished.contains(t)) {
        record_failure(&mut results, &mut issues, tenant, "evaluation task did not complete".into());
    }

    Ok(ScanOutcome {
        endpoints: endpoints.to_vec(),
        results,
        issues,
    })
}

fn record_failure(
    results: &mut Vec<TenantResult>,
    issues: &mut Vec<ScanIssue>,
    tenant: Tenant,
    reason: String,
) {
    issues.push(ScanIssue::TenantFailed {
        tenant: tenant.clone(),
        reason: reason.clone(),
    });
    results.push(TenantResult::failed(tenant, reason));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{lab_resolver, ScriptedProbe};
    use realmscan_domain::{DomainError, ProbeOutcome, ReportStatus};
    use std::time::Duration;

    const E0: &str = "https://e0.test";
    const E1: &str = "https://e1.test";

    fn tenants(ids: &[&str]) -> Vec<Tenant> {
        ids.iter().map(|s| Tenant::new(*s)).collect()
    }

    fn ids(results: &[TenantResult]) -> HashSet<&str> {
        results.iter().map(|r| r.tenant.as_str()).collect()
    }

    #[tokio::test]
    async fn unknown_region_fails_the_run() {
        let probe = ScriptedProbe::new().into_arc();
        let err = run(probe, &lab_resolver(&[E0]), tenants(&["acme"]), &["MARS"], AggregationMode::FirstMatch, 4)
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Domain(DomainError::UnknownRegion(r)) if r == "MARS"));
    }

    #[tokio::test]
    async fn zero_concurrency_is_rejected() {
        let probe = ScriptedProbe::new().into_arc();
        let err = run(probe, &lab_resolver(&[E0]), tenants(&["acme"]), &["LAB"], AggregationMode::FirstMatch, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::InvalidConcurrency));
    }

    #[tokio::test]
    async fn concurrency_bound_is_respected() {
        let names: Vec<String> = (0..12).map(|i| format!("t{i:02}")).collect();
        let probe = ScriptedProbe::new()
            .default_delay(Duration::from_millis(25))
            .into_arc();

        let outcome = run(
            probe.clone(),
            &lab_resolver(&[E0]),
            names.iter().map(Tenant::new).collect(),
            &["LAB"],
            AggregationMode::Exhaustive,
            3,
        )
        .await
        .unwrap();

        assert_eq!(outcome.results.len(), 12);
        assert!(probe.max_in_flight() <= 3, "saw {} in flight", probe.max_in_flight());
        assert_eq!(probe.completed().len(), 12);
    }

    #[tokio::test]
    async fn duplicate_tenants_are_probed_once() {
        let probe = ScriptedProbe::new().into_arc();
        let outcome = run(
            probe.clone(),
            &lab_resolver(&[E0, E1]),
            tenants(&["acme", "zeta", "acme"]),
            &[] as &[&str],
            AggregationMode::Exhaustive,
            2,
        )
        .await
        .unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(ids(&outcome.results), HashSet::from(["acme", "zeta"]));
        assert_eq!(probe.completed().len(), 4);
    }

    #[tokio::test]
    async fn empty_region_marks_every_tenant_unknown() {
        let probe = ScriptedProbe::new().into_arc();
        let outcome = run(
            probe.clone(),
            &lab_resolver(&[E0]),
            tenants(&["acme", "zeta"]),
            &["VOID"],
            AggregationMode::FirstMatch,
            2,
        )
        .await
        .unwrap();

        assert!(outcome.endpoints.is_empty());
        assert_eq!(ids(&outcome.results), HashSet::from(["acme", "zeta"]));
        assert!(outcome.results.iter().all(|r| r.status() == ReportStatus::Unknown));
        assert_eq!(outcome.issues.len(), 2);
        assert!(outcome
            .issues
            .iter()
            .all(|i| matches!(i, ScanIssue::TenantFailed { .. })));
        assert!(probe.completed().is_empty());
    }

    #[tokio::test]
    async fn indeterminate_probes_become_issues() {
        let probe = ScriptedProbe::new()
            .on(E0, "acme", ProbeOutcome::indeterminate("status 503"))
            .on(E1, "acme", ProbeOutcome::Provisioned)
            .into_arc();

        let outcome = run(
            probe,
            &lab_resolver(&[E0, E1]),
            tenants(&["acme"]),
            &["lab"],
            AggregationMode::Exhaustive,
            1,
        )
        .await
        .unwrap();

        assert!(outcome.results[0].enabled);
        assert_eq!(
            outcome.issues,
            vec![ScanIssue::ProbeIndeterminate {
                tenant: Tenant::new("acme"),
                endpoint: Endpoint::new(E0),
                reason: "status 503".into(),
            }]
        );
    }
}
