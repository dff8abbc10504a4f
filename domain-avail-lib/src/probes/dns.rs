//! DNS record probing backed by hickory-resolver.
//!
//! A probe asks one question: does this domain have records of the given
//! type? The answer is folded into a [`ProbeOutcome`] — negative resolver
//! responses are misses, everything else that goes wrong is a probe
//! error. The probe never raises.

use crate::probes::{DnsProbe, ProbeOutcome, ProbeRecordType};
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use std::time::Duration;

impl From<ProbeRecordType> for RecordType {
    fn from(record: ProbeRecordType) -> Self {
        match record {
            ProbeRecordType::A => RecordType::A,
            ProbeRecordType::Mx => RecordType::MX,
            ProbeRecordType::Ns => RecordType::NS,
            ProbeRecordType::Soa => RecordType::SOA,
        }
    }
}

/// DNS probe collaborator using the system's resolver configuration.
///
/// Holds only timeout configuration; carries no per-call mutable state,
/// so one instance is shared read-only across all concurrent checks.
pub struct HickoryDnsProbe {
    resolver: TokioAsyncResolver,
    /// Cap on the total wall-clock time of one probe attempt,
    /// retries included
    lifetime: Duration,
}

impl HickoryDnsProbe {
    /// Create a probe with the default 5 second timeout and lifetime.
    pub fn new() -> Self {
        Self::with_timeouts(Duration::from_secs(5), Duration::from_secs(5))
    }

    /// Create a probe with a custom per-request timeout and per-attempt
    /// lifetime cap.
    ///
    /// Falls back to the library's default nameserver configuration when
    /// the system configuration cannot be read.
    pub fn with_timeouts(timeout: Duration, lifetime: Duration) -> Self {
        let (config, mut opts) = hickory_resolver::system_conf::read_system_conf()
            .unwrap_or_else(|_| (ResolverConfig::default(), ResolverOpts::default()));
        opts.timeout = timeout;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            lifetime,
        }
    }
}

impl Default for HickoryDnsProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsProbe for HickoryDnsProbe {
    async fn probe(&self, domain: &str, record: ProbeRecordType) -> ProbeOutcome {
        let lookup = tokio::time::timeout(
            self.lifetime,
            self.resolver.lookup(domain, RecordType::from(record)),
        )
        .await;

        match lookup {
            Ok(Ok(answer)) => {
                if answer.records().is_empty() {
                    ProbeOutcome::Miss
                } else {
                    ProbeOutcome::Hit
                }
            }
            Ok(Err(err)) => match err.kind() {
                // No answer, NXDOMAIN and no-nameservers responses are
                // expected control signals, not probe failures
                ResolveErrorKind::NoRecordsFound { .. } | ResolveErrorKind::NoConnections => {
                    ProbeOutcome::Miss
                }
                _ => ProbeOutcome::Error(err.to_string()),
            },
            Err(_) => ProbeOutcome::Error(format!(
                "lookup exceeded {:?} lifetime",
                self.lifetime
            )),
        }
    }
}
