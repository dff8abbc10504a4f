//! Collaborator seams for availability checking.
//!
//! The resolver talks to its two network collaborators through the traits
//! defined here, so it can be exercised with deterministic mocks in tests.
//! Production implementations live in the submodules.

/// DNS record probing via hickory-resolver
pub mod dns;

/// WHOIS lookup via the system whois command
pub mod whois;

pub use dns::HickoryDnsProbe;
pub use whois::{is_whois_available, SystemWhois};

use crate::error::DomainCheckError;
use crate::types::WhoisSummary;
use async_trait::async_trait;

/// Record types probed for every domain, in the order they are tried.
/// Probing short-circuits at the first hit.
pub const PROBE_ORDER: [ProbeRecordType; 4] = [
    ProbeRecordType::A,
    ProbeRecordType::Mx,
    ProbeRecordType::Ns,
    ProbeRecordType::Soa,
];

/// DNS record types whose presence implies active use of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeRecordType {
    A,
    Mx,
    Ns,
    Soa,
}

impl std::fmt::Display for ProbeRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeRecordType::A => write!(f, "A"),
            ProbeRecordType::Mx => write!(f, "MX"),
            ProbeRecordType::Ns => write!(f, "NS"),
            ProbeRecordType::Soa => write!(f, "SOA"),
        }
    }
}

/// Tagged outcome of one DNS probe attempt.
///
/// Every attempt yields exactly one of these; probe implementations never
/// raise. `Miss` covers the expected "no answer" / "no such domain" /
/// "no nameservers" responses, `Error` everything else (including
/// timeouts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Records of the requested type exist
    Hit,
    /// The domain has no records of this type
    Miss,
    /// The probe itself failed; the sequence continues with the next type
    Error(String),
}

/// WHOIS lookup collaborator.
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Query the registry for a domain and summarize the record.
    ///
    /// Implementations are responsible for their own timeout; the resolver
    /// applies none on top.
    async fn lookup(&self, domain: &str) -> Result<WhoisSummary, DomainCheckError>;
}

/// DNS probe collaborator.
#[async_trait]
pub trait DnsProbe: Send + Sync {
    /// Probe one record type for a domain.
    async fn probe(&self, domain: &str, record: ProbeRecordType) -> ProbeOutcome;
}
