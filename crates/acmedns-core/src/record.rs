//! Provider-neutral DNS record descriptor
//!
//! Records are supplied by the caller for the duration of a single call.
//! Providers never retain them.

use serde::{Deserialize, Serialize};

/// Resource record type used for ACME DNS-01 challenges
pub const TXT_RECORD_TYPE: &str = "TXT";

/// Owner name prefix every ACME DNS-01 challenge record carries
pub const ACME_CHALLENGE_PREFIX: &str = "_acme-challenge.";

/// A DNS resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Owner name (e.g., "_acme-challenge.example.com")
    pub name: String,

    /// Resource record type (e.g., "TXT")
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record value
    pub data: String,

    /// Time-to-live in seconds, if the caller has an opinion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl Record {
    /// Create a new record
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            data: data.into(),
            ttl: None,
        }
    }

    /// Create a TXT record
    pub fn txt(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(name, TXT_RECORD_TYPE, data)
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Whether this is a TXT record (exact, case-sensitive match)
    pub fn is_txt(&self) -> bool {
        self.record_type == TXT_RECORD_TYPE
    }

    /// Whether the owner name is an ACME challenge name
    pub fn is_acme_challenge(&self) -> bool {
        self.name.starts_with(ACME_CHALLENGE_PREFIX)
    }
}

/// Build the challenge record name for a domain
///
/// For `example.com`, returns `_acme-challenge.example.com`.
/// Wildcards share the base domain's challenge name, so `*.example.com`
/// also returns `_acme-challenge.example.com`. A trailing root dot is dropped.
pub fn challenge_record_name(domain: &str) -> String {
    let domain = domain.trim_end_matches('.');
    let domain = domain.strip_prefix("*.").unwrap_or(domain);
    format!("{}{}", ACME_CHALLENGE_PREFIX, domain)
}
