//! In-process probe with scripted outcomes and latencies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use realmscan_domain::{
    Endpoint, EndpointResolver, ProbeOutcome, Region, RegionCatalog, RegionCode, Tenant,
};
use realmscan_probe::RealmProbe;

#[derive(Clone)]
struct Step {
    outcome: ProbeOutcome,
    delay: Duration,
    panic: bool,
}

#[derive(Default)]
pub struct ScriptedProbe {
    steps: HashMap<(String, String), Step>,
    default_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: Mutex<Vec<(Endpoint, Tenant)>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn on(self, endpoint: &str, tenant: &str, outcome: ProbeOutcome) -> Self {
        let delay = self.default_delay;
        self.on_after(endpoint, tenant, outcome, delay)
    }

    pub fn on_after(
        mut self,
        endpoint: &str,
        tenant: &str,
        outcome: ProbeOutcome,
        delay: Duration,
    ) -> Self {
        self.steps.insert(
            key(endpoint, tenant),
            Step { outcome, delay, panic: false },
        );
        self
    }

    pub fn panics_on(mut self, endpoint: &str, tenant: &str) -> Self {
        self.steps.insert(
            key(endpoint, tenant),
            Step {
                outcome: ProbeOutcome::NotProvisioned,
                delay: Duration::ZERO,
                panic: true,
            },
        );
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Probes that ran to completion, in completion order.
    pub fn completed(&self) -> Vec<(Endpoint, Tenant)> {
        self.completed.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

fn key(endpoint: &str, tenant: &str) -> (String, String) {
    (Endpoint::new(endpoint).as_str().to_string(), tenant.to_string())
}

#[async_trait]
impl RealmProbe for ScriptedProbe {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn probe(&self, endpoint: &Endpoint, tenant: &Tenant) -> ProbeOutcome {
        let step = self
            .steps
            .get(&key(endpoint.as_str(), tenant.as_str()))
            .cloned()
            .unwrap_or(Step {
                outcome: ProbeOutcome::NotProvisioned,
                delay: self.default_delay,
                panic: false,
            });
        if step.panic {
            panic!("scripted probe failure for {tenant} on {endpoint}");
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(step.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.completed
            .lock()
            .unwrap()
            .push((endpoint.clone(), tenant.clone()));
        step.outcome
    }
}

/// Resolver over one `LAB` region holding `urls`, plus an empty `VOID` region.
pub fn lab_resolver(urls: &[&str]) -> EndpointResolver {
    let catalog = RegionCatalog::new(
        RegionCode::new("LAB"),
        vec![
            Region {
                code: RegionCode::new("LAB"),
                endpoints: urls.iter().map(|u| Endpoint::new(*u)).collect(),
            },
            Region {
                code: RegionCode::new("VOID"),
                endpoints: vec![],
            },
        ],
    )
    .unwrap();
    EndpointResolver::new(Arc::new(catalog))
}

pub fn endpoints(urls: &[&str]) -> Vec<Endpoint> {
    urls.iter().map(|u| Endpoint::new(*u)).collect()
}
