use std::sync::Arc;

use realmscan_domain::{AggregationMode, Endpoint, ProbeOutcome, Tenant, TenantResult};
use realmscan_probe::RealmProbe;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::error::ScanError;

/// A probe that produced no usable signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub endpoint: Endpoint,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct TenantEvaluation {
    pub result: TenantResult,
    /// Indeterminate probes, in resolver order. Counted as non-matches.
    pub failures: Vec<ProbeFailure>,
}

/// Probe every endpoint for `tenant` concurrently and fold the outcomes.
///
/// In [`AggregationMode::FirstMatch`] the first `Provisioned` outcome ends the
/// evaluation and the remaining probe tasks are aborted; whatever they would
/// have returned is never observed. In [`AggregationMode::Exhaustive`] every
/// probe is awaited and matches are kept in resolver order.
pub async fn evaluate(
    probe: Arc<dyn RealmProbe>,
    tenant: &Tenant,
    endpoints: &[Endpoint],
    mode: AggregationMode,
) -> Result<TenantEvaluation, ScanError> {
    if endpoints.is_empty() {
        return Err(ScanError::NoCandidateEndpoints(tenant.clone()));
    }

    let mut probes = JoinSet::new();
    for (idx, endpoint) in endpoints.iter().enumerate() {
        let probe = probe.clone();
        let endpoint = endpoint.clone();
        let tenant = tenant.clone();
        probes.spawn(async move { (idx, probe.probe(&endpoint, &tenant).await) });
    }

    // One slot per endpoint, written only by this loop.
    let mut outcomes: Vec<Option<ProbeOutcome>> = vec![None; endpoints.len()];

    while let Some(joined) = probes.join_next().await {
        let (idx, outcome) = match joined {
            Ok(pair) => pair,
            Err(e) => {
                // Which endpoint crashed is recovered below from the empty slot.
                error!(tenant = %tenant, error = %e, "Probe task failed");
                continue;
            }
        };

        if let ProbeOutcome::Indeterminate { reason } = &outcome {
            warn!(tenant = %tenant, endpoint = %endpoints[idx], reason = %reason, "Indeterminate probe");
        }

        if mode == AggregationMode::FirstMatch && outcome.is_provisioned() {
            debug!(
                tenant = %tenant,
                endpoint = %endpoints[idx],
                abandoned = probes.len(),
                "First match found"
            );
            probes.abort_all();
            outcomes[idx] = Some(outcome);
            return Ok(TenantEvaluation {
                result: TenantResult::new(tenant.clone(), vec![endpoints[idx].clone()]),
                failures: collect_failures(endpoints, &outcomes, false),
            });
        }
        outcomes[idx] = Some(outcome);
    }

    let matched = endpoints
        .iter()
        .zip(&outcomes)
        .filter(|(_, o)| matches!(o, Some(ProbeOutcome::Provisioned)))
        .map(|(e, _)| e.clone())
        .collect();

    Ok(TenantEvaluation {
        result: TenantResult::new(tenant.clone(), matched),
        failures: collect_failures(endpoints, &outcomes, true),
    })
}

/// Indeterminate outcomes, plus (once every task has finished) the slots no
/// task ever filled.
fn collect_failures(
    endpoints: &[Endpoint],
    outcomes: &[Option<ProbeOutcome>],
    all_joined: bool,
) -> Vec<ProbeFailure> {
    endpoints
        .iter()
        .zip(outcomes)
        .filter_map(|(endpoint, outcome)| {
            let reason = match outcome {
                Some(ProbeOutcome::Indeterminate { reason }) => reason.clone(),
                None if all_joined => "probe task did not complete".to_string(),
                _ => return None,
            };
            Some(ProbeFailure { endpoint: endpoint.clone(), reason })
        })
        .collect()
}
