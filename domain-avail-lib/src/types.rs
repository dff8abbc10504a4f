//! Core data types for domain availability verdicts.
//!
//! This module defines the verdict produced for each checked domain,
//! the WHOIS outcome it embeds, and the resolver configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Verdict for a single checked domain.
///
/// Combines the WHOIS signal and the DNS probe signal into a single
/// best-effort availability conclusion with a confidence grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainVerdict {
    /// The domain name that was checked, unchanged from input
    pub domain: String,

    /// Best-effort availability conclusion.
    /// Always false when any DNS record was found.
    pub available: bool,

    /// Whether any DNS probe (A, MX, NS, SOA) produced records
    pub dns_records_exist: bool,

    /// Outcome of the WHOIS lookup for this domain
    pub whois_result: WhoisOutcome,

    /// Strength of the `available` conclusion, derived from the
    /// WHOIS outcome and the DNS probe result
    pub confidence: Confidence,
}

/// Outcome of a WHOIS lookup.
///
/// Serializes untagged so the wire shape is either
/// `{"available": .., "whois_data": ..}` or `{"available": false, "error": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhoisOutcome {
    /// The registry answered; availability was read off the record fields
    Resolved {
        available: bool,
        whois_data: WhoisSummary,
    },

    /// The lookup failed (network, timeout, unparseable response).
    /// `available` is kept in the wire shape and is always false here.
    Failed { available: bool, error: String },
}

/// Narrow view of a WHOIS registry record.
///
/// WHOIS responses are loosely structured text; this summary exposes only
/// the two fields the resolver needs, decoupling it from whatever the
/// lookup collaborator natively returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhoisSummary {
    /// The registrar that manages this domain, if the record names one
    pub registrar: Option<String>,

    /// Whether the record carried any status flags
    /// (e.g. "clientTransferProhibited")
    pub has_status: bool,
}

impl WhoisSummary {
    /// A domain with neither a registrar nor status flags appears
    /// unregistered.
    pub fn is_available(&self) -> bool {
        !self.has_status
            && self
                .registrar
                .as_deref()
                .map_or(true, |r| r.trim().is_empty())
    }
}

impl WhoisOutcome {
    /// Build the outcome for a registry record that was successfully read.
    pub fn resolved(summary: WhoisSummary) -> Self {
        Self::Resolved {
            available: summary.is_available(),
            whois_data: summary,
        }
    }

    /// Build the outcome for a failed lookup.
    pub fn failed<E: Into<String>>(error: E) -> Self {
        Self::Failed {
            available: false,
            error: error.into(),
        }
    }

    /// Availability as asserted by WHOIS alone (false for failed lookups).
    pub fn available(&self) -> bool {
        match self {
            Self::Resolved { available, .. } => *available,
            Self::Failed { .. } => false,
        }
    }

    /// Whether the lookup failed rather than resolving a record.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Strength of an availability conclusion.
///
/// Derived deterministically from the WHOIS outcome and the DNS probe
/// result; never set independently. Wire strings match the grades the
/// serving shell reports ("very low", "low", "medium", "high").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "very low")]
    VeryLow,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::VeryLow => write!(f, "very low"),
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// Batch result: one verdict per distinct input domain, keyed by the
/// domain string as given. Duplicate inputs collapse to a single entry.
pub type BatchResult = HashMap<String, DomainVerdict>;

/// Configuration for an availability resolver.
///
/// Immutable for the resolver's lifetime; the resolver holds no other
/// state across calls.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Maximum number of domains checked concurrently in a batch.
    /// Default: 10, Range: 1-100
    pub concurrency: usize,

    /// Timeout for each individual DNS resolution request.
    /// Default: 5 seconds
    pub dns_timeout: Duration,

    /// Total lifetime cap for one DNS probe attempt (covers retries).
    /// Default: 5 seconds
    pub dns_lifetime: Duration,

    /// Timeout applied inside the WHOIS collaborator. The resolver itself
    /// imposes no additional timeout on WHOIS lookups.
    /// Default: 5 seconds
    pub whois_timeout: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            dns_timeout: Duration::from_secs(5),
            dns_lifetime: Duration::from_secs(5),
            whois_timeout: Duration::from_secs(5),
        }
    }
}

impl CheckConfig {
    /// Set the batch fan-out cap.
    ///
    /// Automatically capped at 100 to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set the per-request DNS timeout.
    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = timeout;
        self
    }

    /// Set the total lifetime cap for one DNS probe attempt.
    pub fn with_dns_lifetime(mut self, lifetime: Duration) -> Self {
        self.dns_lifetime = lifetime;
        self
    }

    /// Set the WHOIS collaborator timeout.
    pub fn with_whois_timeout(mut self, timeout: Duration) -> Self {
        self.whois_timeout = timeout;
        self
    }
}
