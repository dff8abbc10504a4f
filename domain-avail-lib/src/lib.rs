//! # Domain Availability Library
//!
//! Determines whether a domain name is likely available for registration
//! by combining two independent signals: a WHOIS registry lookup and a
//! DNS record probe. The two signals merge into a single verdict with a
//! confidence grade; batches of domains are checked concurrently.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_avail_lib::AvailabilityResolver;
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolver = AvailabilityResolver::new();
//!     let verdict = resolver.check_one("example.com").await;
//!
//!     println!(
//!         "{}: available={} (confidence: {})",
//!         verdict.domain, verdict.available, verdict.confidence
//!     );
//! }
//! ```
//!
//! ## How a verdict is reached
//!
//! - WHOIS resolves first: a record with no registrar and no status flags
//!   reads as available; a failed lookup only downgrades confidence.
//! - DNS record types are then probed in fixed order (A, MX, NS, SOA)
//!   with first-hit short-circuit.
//! - Any DNS hit forces `available = false` regardless of WHOIS — live
//!   records are the strongest signal that a domain is in use.
//!
//! Checks never raise; all failures are captured in the verdict itself.

// Re-export main public API types and functions
pub use error::DomainCheckError;
pub use probes::{
    is_whois_available, DnsProbe, HickoryDnsProbe, ProbeOutcome, ProbeRecordType, SystemWhois,
    WhoisLookup, PROBE_ORDER,
};
pub use resolver::AvailabilityResolver;
pub use types::{BatchResult, CheckConfig, Confidence, DomainVerdict, WhoisOutcome, WhoisSummary};

mod error;
mod probes;
mod resolver;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainCheckError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
