#[cfg(test)]
mod tests {
    use crate::tenant::dedup_tenants;
    use crate::types::*;

    fn tenants(ids: &[&str]) -> Vec<Tenant> {
        ids.iter().map(|s| Tenant::new(*s)).collect()
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let out = dedup_tenants(tenants(&["b", "a", "b", "c", "a"]));
        assert_eq!(out, tenants(&["b", "a", "c"]));
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let out = dedup_tenants(tenants(&["Acme", "acme", "Acme"]));
        assert_eq!(out, tenants(&["Acme", "acme"]));
    }

    #[test]
    fn endpoint_drops_trailing_slash() {
        assert_eq!(Endpoint::new("https://iam.example/").as_str(), "https://iam.example");
        assert_eq!(Endpoint::new(" https://iam.example "), Endpoint::new("https://iam.example"));
    }

    #[test]
    fn enabled_follows_matches() {
        let t = Tenant::new("acme");
        assert!(!TenantResult::new(t.clone(), vec![]).enabled);
        assert!(TenantResult::new(t, vec![Endpoint::new("https://a")]).enabled);
    }

    #[test]
    fn status_labels() {
        let t = Tenant::new("acme");
        let enabled = TenantResult::new(t.clone(), vec![Endpoint::new("https://a")]);
        let disabled = TenantResult::new(t.clone(), vec![]);
        let failed = TenantResult::failed(t, "no candidate endpoints");

        assert_eq!(enabled.status().to_string(), "Enabled");
        assert_eq!(disabled.status().to_string(), "Disabled");
        assert_eq!(failed.status().to_string(), "Unknown");
        assert!(!failed.enabled);
    }

    #[test]
    fn regional_url_joins_or_placeholder() {
        let row = ReportRow::from(&TenantResult::new(
            Tenant::new("acme"),
            vec![Endpoint::new("https://a"), Endpoint::new("https://b")],
        ));
        assert_eq!(row.regional_url(), "https://a|https://b");

        let row = ReportRow::from(&TenantResult::new(Tenant::new("zeta"), vec![]));
        assert_eq!(row.regional_url(), "N/A");
    }

    #[test]
    fn report_status_serializes_as_label() {
        let json = serde_json::to_string(&ReportStatus::Enabled).unwrap();
        assert_eq!(json, "\"Enabled\"");
        let mode: AggregationMode = serde_json::from_str("\"exhaustive\"").unwrap();
        assert_eq!(mode, AggregationMode::Exhaustive);
    }

    #[test]
    fn only_provisioned_counts_as_match() {
        assert!(ProbeOutcome::Provisioned.is_provisioned());
        assert!(!ProbeOutcome::NotProvisioned.is_provisioned());
        assert!(!ProbeOutcome::indeterminate("timeout").is_provisioned());
    }
}
