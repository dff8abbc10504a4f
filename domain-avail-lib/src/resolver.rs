//! Availability resolver implementation.
//!
//! This module provides the `AvailabilityResolver` struct that orchestrates
//! the WHOIS lookup and the DNS record probe for a single domain, and fans
//! out concurrently across a batch. A check never raises: every failure is
//! captured into the verdict's fields.

use crate::probes::{
    DnsProbe, HickoryDnsProbe, ProbeOutcome, SystemWhois, WhoisLookup, PROBE_ORDER,
};
use crate::types::{BatchResult, CheckConfig, Confidence, DomainVerdict, WhoisOutcome};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Resolves domain availability from two independent signals.
///
/// For each domain the resolver:
/// 1. Queries WHOIS and reads availability off the record fields
/// 2. Probes DNS record types in fixed order with first-hit short-circuit
/// 3. Combines both signals into an availability verdict with a
///    confidence grade
///
/// # Example
///
/// ```rust,no_run
/// use domain_avail_lib::AvailabilityResolver;
///
/// #[tokio::main]
/// async fn main() {
///     let resolver = AvailabilityResolver::new();
///     let verdict = resolver.check_one("example.com").await;
///     println!("{} available: {}", verdict.domain, verdict.available);
/// }
/// ```
pub struct AvailabilityResolver {
    /// Configuration settings for this resolver instance
    config: CheckConfig,
    /// WHOIS lookup collaborator
    whois: Arc<dyn WhoisLookup>,
    /// DNS probe collaborator, shared read-only across concurrent checks
    dns: Arc<dyn DnsProbe>,
}

impl AvailabilityResolver {
    /// Create a resolver with default configuration and the production
    /// collaborators (system whois command, system DNS configuration).
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a resolver with custom configuration.
    pub fn with_config(config: CheckConfig) -> Self {
        let whois = Arc::new(SystemWhois::with_timeout(config.whois_timeout));
        let dns = Arc::new(HickoryDnsProbe::with_timeouts(
            config.dns_timeout,
            config.dns_lifetime,
        ));
        Self::with_collaborators(config, whois, dns)
    }

    /// Create a resolver with explicit collaborators.
    ///
    /// This is also how tests inject deterministic WHOIS and DNS mocks.
    pub fn with_collaborators(
        config: CheckConfig,
        whois: Arc<dyn WhoisLookup>,
        dns: Arc<dyn DnsProbe>,
    ) -> Self {
        Self { config, whois, dns }
    }

    /// Get the current configuration for this resolver.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check availability of a single domain.
    ///
    /// Never fails: WHOIS errors downgrade the confidence grade, DNS probe
    /// errors are logged and skipped, and the caller always receives a
    /// complete verdict.
    pub async fn check_one(&self, domain: &str) -> DomainVerdict {
        let whois_result = match self.whois.lookup(domain).await {
            Ok(summary) => {
                if summary.is_available() {
                    tracing::info!(domain, "domain appears to be available (no registrar/status)");
                } else {
                    tracing::info!(
                        domain,
                        registrar = summary.registrar.as_deref().unwrap_or("unknown"),
                        "domain is registered"
                    );
                }
                WhoisOutcome::resolved(summary)
            }
            Err(e) => {
                tracing::error!(domain, error = %e, "WHOIS lookup failed");
                WhoisOutcome::failed(e.to_string())
            }
        };

        // Availability cannot be confirmed without WHOIS data
        let provisional_available = whois_result.available();

        let dns_records_exist = self.probe_dns_records(domain).await;

        // DNS presence overrides any WHOIS signal
        let (available, confidence) = if dns_records_exist {
            (false, Confidence::High)
        } else if provisional_available {
            (true, Confidence::High)
        } else if whois_result.is_failed() {
            (false, Confidence::VeryLow)
        } else {
            (false, Confidence::Medium)
        };

        DomainVerdict {
            domain: domain.to_string(),
            available,
            dns_records_exist,
            whois_result,
            confidence,
        }
    }

    /// Check availability of multiple domains concurrently.
    ///
    /// Fan-out is capped at `config.concurrency` in-flight checks. The
    /// call completes only when every individual check has completed;
    /// since `check_one` never fails, a batch cannot partially fail.
    ///
    /// Results are keyed by the input domain string. Duplicate inputs
    /// collapse to a single entry (last completion wins; verdicts for the
    /// same domain are equivalent).
    pub async fn check_many(&self, domains: &[String]) -> BatchResult {
        let verdicts: Vec<DomainVerdict> = stream::iter(domains.to_vec())
            .map(|domain| async move { self.check_one(&domain).await })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        verdicts
            .into_iter()
            .map(|verdict| (verdict.domain.clone(), verdict))
            .collect()
    }

    /// Probe DNS record types in fixed order, stopping at the first hit.
    ///
    /// A miss moves on to the next type; a probe error is logged and also
    /// moves on — a broken probe must not abort the whole check.
    async fn probe_dns_records(&self, domain: &str) -> bool {
        for record in PROBE_ORDER {
            match self.dns.probe(domain, record).await {
                ProbeOutcome::Hit => {
                    tracing::info!(domain, record = %record, "found DNS record");
                    return true;
                }
                ProbeOutcome::Miss => continue,
                ProbeOutcome::Error(reason) => {
                    tracing::warn!(domain, record = %record, reason, "error checking DNS records");
                }
            }
        }
        false
    }
}

impl Default for AvailabilityResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainCheckError;
    use crate::probes::ProbeRecordType;
    use crate::types::WhoisSummary;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// WHOIS mock with one scripted outcome per domain.
    /// Unscripted domains resolve to an empty (available) record.
    struct ScriptedWhois {
        outcomes: HashMap<String, Result<WhoisSummary, DomainCheckError>>,
    }

    impl ScriptedWhois {
        fn new() -> Self {
            Self {
                outcomes: HashMap::new(),
            }
        }

        fn registered(mut self, domain: &str, registrar: &str) -> Self {
            self.outcomes.insert(
                domain.to_string(),
                Ok(WhoisSummary {
                    registrar: Some(registrar.to_string()),
                    has_status: true,
                }),
            );
            self
        }

        fn unregistered(mut self, domain: &str) -> Self {
            self.outcomes
                .insert(domain.to_string(), Ok(WhoisSummary::default()));
            self
        }

        fn failing(mut self, domain: &str, message: &str) -> Self {
            self.outcomes.insert(
                domain.to_string(),
                Err(DomainCheckError::whois(domain, message)),
            );
            self
        }
    }

    #[async_trait]
    impl WhoisLookup for ScriptedWhois {
        async fn lookup(&self, domain: &str) -> Result<WhoisSummary, DomainCheckError> {
            self.outcomes
                .get(domain)
                .cloned()
                .unwrap_or(Ok(WhoisSummary::default()))
        }
    }

    /// DNS mock scripted per (domain, record type), recording call order.
    /// Unscripted probes miss.
    struct ScriptedDns {
        outcomes: HashMap<(String, ProbeRecordType), ProbeOutcome>,
        calls: Mutex<Vec<(String, ProbeRecordType)>>,
    }

    impl ScriptedDns {
        fn new() -> Self {
            Self {
                outcomes: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with(mut self, domain: &str, record: ProbeRecordType, outcome: ProbeOutcome) -> Self {
            self.outcomes.insert((domain.to_string(), record), outcome);
            self
        }

        fn calls_for(&self, domain: &str) -> Vec<ProbeRecordType> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(d, _)| d == domain)
                .map(|(_, r)| *r)
                .collect()
        }
    }

    #[async_trait]
    impl DnsProbe for ScriptedDns {
        async fn probe(&self, domain: &str, record: ProbeRecordType) -> ProbeOutcome {
            self.calls
                .lock()
                .unwrap()
                .push((domain.to_string(), record));
            self.outcomes
                .get(&(domain.to_string(), record))
                .cloned()
                .unwrap_or(ProbeOutcome::Miss)
        }
    }

    fn resolver_with(whois: ScriptedWhois, dns: Arc<ScriptedDns>) -> AvailabilityResolver {
        AvailabilityResolver::with_collaborators(CheckConfig::default(), Arc::new(whois), dns)
    }

    #[tokio::test]
    async fn dns_hit_overrides_whois_signal() {
        let whois = ScriptedWhois::new().registered("example.com", "Example Registrar");
        let dns = Arc::new(ScriptedDns::new().with(
            "example.com",
            ProbeRecordType::A,
            ProbeOutcome::Hit,
        ));
        let resolver = resolver_with(whois, dns.clone());

        let verdict = resolver.check_one("example.com").await;
        assert!(!verdict.available);
        assert!(verdict.dns_records_exist);
        assert_eq!(verdict.confidence, Confidence::High);
        // First hit wins: nothing past A was probed
        assert_eq!(dns.calls_for("example.com"), vec![ProbeRecordType::A]);
    }

    #[tokio::test]
    async fn dns_overrides_even_when_whois_says_available() {
        // Edge case: no registrar in WHOIS but an active A record
        let whois = ScriptedWhois::new().unregistered("stealth.com");
        let dns = Arc::new(ScriptedDns::new().with(
            "stealth.com",
            ProbeRecordType::A,
            ProbeOutcome::Hit,
        ));
        let resolver = resolver_with(whois, dns);

        let verdict = resolver.check_one("stealth.com").await;
        assert!(!verdict.available);
        assert!(verdict.dns_records_exist);
        assert_eq!(verdict.confidence, Confidence::High);
        assert!(verdict.whois_result.available());
    }

    #[tokio::test]
    async fn probing_short_circuits_at_first_hit() {
        let whois = ScriptedWhois::new().registered("mail-only.org", "Some Registrar");
        let dns = Arc::new(
            ScriptedDns::new()
                .with("mail-only.org", ProbeRecordType::A, ProbeOutcome::Miss)
                .with("mail-only.org", ProbeRecordType::Mx, ProbeOutcome::Hit),
        );
        let resolver = resolver_with(whois, dns.clone());

        let verdict = resolver.check_one("mail-only.org").await;
        assert!(verdict.dns_records_exist);
        assert_eq!(
            dns.calls_for("mail-only.org"),
            vec![ProbeRecordType::A, ProbeRecordType::Mx]
        );
    }

    #[tokio::test]
    async fn probe_error_does_not_abort_the_sequence() {
        let whois = ScriptedWhois::new().registered("flaky.net", "Some Registrar");
        let dns = Arc::new(
            ScriptedDns::new()
                .with(
                    "flaky.net",
                    ProbeRecordType::A,
                    ProbeOutcome::Error("SERVFAIL".to_string()),
                )
                .with("flaky.net", ProbeRecordType::Mx, ProbeOutcome::Hit),
        );
        let resolver = resolver_with(whois, dns.clone());

        let verdict = resolver.check_one("flaky.net").await;
        assert!(verdict.dns_records_exist);
        assert_eq!(verdict.confidence, Confidence::High);
        assert_eq!(
            dns.calls_for("flaky.net"),
            vec![ProbeRecordType::A, ProbeRecordType::Mx]
        );
    }

    #[tokio::test]
    async fn probe_order_is_fixed_when_all_miss() {
        let whois = ScriptedWhois::new().unregistered("nothing.test");
        let dns = Arc::new(ScriptedDns::new());
        let resolver = resolver_with(whois, dns.clone());

        let verdict = resolver.check_one("nothing.test").await;
        assert!(!verdict.dns_records_exist);
        assert_eq!(
            dns.calls_for("nothing.test"),
            vec![
                ProbeRecordType::A,
                ProbeRecordType::Mx,
                ProbeRecordType::Ns,
                ProbeRecordType::Soa,
            ]
        );
    }

    #[tokio::test]
    async fn whois_available_and_no_dns_is_high_confidence() {
        let whois = ScriptedWhois::new().unregistered("totally-unregistered-xyz123.test");
        let dns = Arc::new(ScriptedDns::new());
        let resolver = resolver_with(whois, dns);

        let verdict = resolver.check_one("totally-unregistered-xyz123.test").await;
        assert!(verdict.available);
        assert!(!verdict.dns_records_exist);
        assert_eq!(verdict.confidence, Confidence::High);
    }

    #[tokio::test]
    async fn whois_registered_and_no_dns_is_medium_confidence() {
        let whois = ScriptedWhois::new().registered("parked.com", "Parking Registrar");
        let dns = Arc::new(ScriptedDns::new());
        let resolver = resolver_with(whois, dns);

        let verdict = resolver.check_one("parked.com").await;
        assert!(!verdict.available);
        assert!(!verdict.dns_records_exist);
        assert_eq!(verdict.confidence, Confidence::Medium);
    }

    #[tokio::test]
    async fn whois_failure_and_no_dns_is_very_low_confidence() {
        let whois = ScriptedWhois::new().failing("timeout-case.test", "query timed out");
        let dns = Arc::new(ScriptedDns::new());
        let resolver = resolver_with(whois, dns);

        let verdict = resolver.check_one("timeout-case.test").await;
        // Availability is never asserted on missing/failed data alone
        assert!(!verdict.available);
        assert!(!verdict.dns_records_exist);
        assert_eq!(verdict.confidence, Confidence::VeryLow);
        assert!(verdict.whois_result.is_failed());
        match &verdict.whois_result {
            WhoisOutcome::Failed { available, error } => {
                assert!(!available);
                assert!(error.contains("query timed out"));
            }
            other => panic!("expected failed WHOIS outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn batch_produces_one_verdict_per_distinct_domain() {
        let whois = ScriptedWhois::new()
            .registered("taken.com", "Example Registrar")
            .unregistered("free.com")
            .failing("broken.com", "connection reset");
        let dns = Arc::new(ScriptedDns::new().with(
            "taken.com",
            ProbeRecordType::A,
            ProbeOutcome::Hit,
        ));
        let resolver = resolver_with(whois, dns);

        let domains: Vec<String> = ["taken.com", "free.com", "broken.com"]
            .iter()
            .map(|d| d.to_string())
            .collect();
        let results = resolver.check_many(&domains).await;

        assert_eq!(results.len(), 3);
        assert!(!results["taken.com"].available);
        assert_eq!(results["taken.com"].confidence, Confidence::High);
        assert!(results["free.com"].available);
        assert_eq!(results["free.com"].confidence, Confidence::High);
        assert!(!results["broken.com"].available);
        assert_eq!(results["broken.com"].confidence, Confidence::VeryLow);

        // Each batch entry matches what a standalone check produces
        for domain in &domains {
            assert_eq!(&resolver.check_one(domain).await, &results[domain.as_str()]);
        }
    }

    #[tokio::test]
    async fn batch_collapses_duplicate_domains() {
        let whois = ScriptedWhois::new().unregistered("dup.com");
        let dns = Arc::new(ScriptedDns::new());
        let resolver = resolver_with(whois, dns);

        let domains: Vec<String> = ["dup.com", "other.com", "dup.com"]
            .iter()
            .map(|d| d.to_string())
            .collect();
        let results = resolver.check_many(&domains).await;

        assert_eq!(results.len(), 2);
        assert!(results.contains_key("dup.com"));
        assert!(results.contains_key("other.com"));
    }

    #[tokio::test]
    async fn batch_future_can_run_on_a_spawned_task() {
        // The batch future must stay Send-friendly so callers (e.g. an MCP
        // tool handler) can move it across task boundaries.
        let whois = ScriptedWhois::new().unregistered("spawned.com");
        let resolver = Arc::new(resolver_with(whois, Arc::new(ScriptedDns::new())));

        let handle = tokio::spawn({
            let resolver = Arc::clone(&resolver);
            async move {
                let domains = vec!["spawned.com".to_string()];
                resolver.check_many(&domains).await
            }
        });

        let results = handle.await.expect("batch task panicked");
        assert!(results["spawned.com"].available);
    }

    #[tokio::test]
    async fn batch_of_empty_input_is_empty() {
        let resolver = resolver_with(ScriptedWhois::new(), Arc::new(ScriptedDns::new()));
        let results = resolver.check_many(&[]).await;
        assert!(results.is_empty());
    }

    #[test]
    fn resolver_exposes_its_configuration() {
        let config = CheckConfig::default()
            .with_concurrency(3)
            .with_whois_timeout(Duration::from_secs(2));
        let resolver = AvailabilityResolver::with_collaborators(
            config,
            Arc::new(ScriptedWhois::new()),
            Arc::new(ScriptedDns::new()),
        );
        assert_eq!(resolver.config().concurrency, 3);
        assert_eq!(resolver.config().whois_timeout, Duration::from_secs(2));
    }
}
