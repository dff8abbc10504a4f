//! WHOIS lookup implementation for domain availability checking.
//!
//! This module queries registration data through the system's `whois`
//! command-line tool. WHOIS responses are unstructured text that varies
//! between registries, so parsing extracts only the narrow summary the
//! resolver needs: the registrar name and whether status flags are
//! present.

use crate::error::DomainCheckError;
use crate::probes::WhoisLookup;
use crate::types::WhoisSummary;
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

/// Patterns that indicate the registry has no record for the domain.
/// Responses matching any of these summarize to an empty record
/// (no registrar, no status).
const NO_MATCH_PATTERNS: [&str; 18] = [
    "no match",
    "not found",
    "no data found",
    "no entries found",
    "domain not found",
    "domain available",
    "status: available",
    "status: free",
    "no information available",
    "not registered",
    "no matching record",
    "domain status: no object found",
    "the queried object does not exist",
    "object does not exist",
    "no matching entry",
    "domain name not found",
    "this domain name has not been registered",
    "no found",
];

/// WHOIS client backed by the system's whois command.
///
/// Applies its own timeout to each query; callers do not need to wrap
/// lookups in another one.
#[derive(Clone)]
pub struct SystemWhois {
    /// Timeout for WHOIS requests
    timeout: Duration,
}

impl SystemWhois {
    /// Create a new WHOIS client with the default 5 second timeout.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }

    /// Create a new WHOIS client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Execute the system whois command and summarize the response.
    async fn execute_whois_command(&self, domain: &str) -> Result<WhoisSummary, DomainCheckError> {
        let output = Command::new("whois")
            .arg(domain)
            .output()
            .await
            .map_err(|e| {
                DomainCheckError::whois(
                    domain,
                    format!(
                        "Failed to execute whois command: {}. Make sure 'whois' is installed.",
                        e
                    ),
                )
            })?;

        let response = String::from_utf8_lossy(&output.stdout);
        parse_whois_summary(domain, &response)
    }
}

#[async_trait]
impl WhoisLookup for SystemWhois {
    async fn lookup(&self, domain: &str) -> Result<WhoisSummary, DomainCheckError> {
        match tokio::time::timeout(self.timeout, self.execute_whois_command(domain)).await {
            Ok(result) => result,
            Err(_) => Err(DomainCheckError::timeout("WHOIS query", self.timeout)),
        }
    }
}

impl Default for SystemWhois {
    fn default() -> Self {
        Self::new()
    }
}

/// Summarize a raw WHOIS response into registrar and status presence.
///
/// "No match"-style responses yield an empty summary — the registry has
/// no record, which is how an available domain looks over WHOIS. A
/// response that matches neither the no-match patterns nor any
/// registrar/status field is a parse failure, not a guess: asserting
/// availability from unreadable data would be a false positive.
fn parse_whois_summary(domain: &str, response: &str) -> Result<WhoisSummary, DomainCheckError> {
    let response_lower = response.to_lowercase();

    for pattern in &NO_MATCH_PATTERNS {
        if response_lower.contains(pattern) {
            return Ok(WhoisSummary::default());
        }
    }

    let registrar = extract_field(response, "registrar:");
    let has_status =
        extract_field(response, "domain status:").is_some() || has_status_line(response);

    if registrar.is_none() && !has_status {
        // Very short responses with no fields at all behave like an
        // empty record
        if response_lower.trim().len() < 50 {
            return Ok(WhoisSummary::default());
        }

        return Err(DomainCheckError::whois(
            domain,
            "Unable to determine registration status from WHOIS response",
        ));
    }

    Ok(WhoisSummary {
        registrar,
        has_status,
    })
}

/// Extract the value of the first line starting with `key`
/// (case-insensitive). Returns None when the line is absent or its value
/// is empty.
fn extract_field(response: &str, key: &str) -> Option<String> {
    for line in response.lines() {
        let trimmed = line.trim();
        // get() keeps the slice on a char boundary for non-ASCII responses
        if let Some(prefix) = trimmed.get(..key.len()) {
            if prefix.eq_ignore_ascii_case(key) {
                let value = trimmed[key.len()..].trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Whether the response carries a bare `status:` line with a value.
/// Checked separately from `domain status:` because registries use both
/// spellings.
fn has_status_line(response: &str) -> bool {
    extract_field(response, "status:").is_some()
}

/// Check if the system has a working whois command.
///
/// Used by integration tests to skip live lookups on systems without the
/// tool installed.
pub async fn is_whois_available() -> bool {
    match Command::new("whois").arg("--version").output().await {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}
