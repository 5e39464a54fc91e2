// # myaddr DNS Provider
//
// This crate provides a myaddr.tools DNS provider for publishing ACME DNS-01
// challenges.
//
// ## Behavior
//
// - ✅ One HTTP request per record, sent sequentially in input order
// - ✅ Whole batch is validated before the first request leaves the process
// - ✅ First failure aborts the call (already published records stay published)
// - ✅ HTTP timeout configured (30 seconds by default)
// - ❌ NO retry logic (the caller decides)
// - ❌ NO deletion (myaddr expires challenge records on its own)
// - ❌ NO zone handling (myaddr keys updates by the shared secret only)
//
// ## Security Requirements
//
// - Key NEVER appears in logs, Debug output, or error messages
// - Provider MUST fail fast if the key is empty
//
// ## API Reference
//
// ```http
// POST https://myaddr.tools/update
// Content-Type: application/json
//
// {"key": "<key>", "acme_challenge": "<txt value>"}
// ```
//
// Any status other than 200 is a failure.

use acmedns_core::config::ProviderConfig;
use acmedns_core::record::Record;
use acmedns_core::traits::{
    DnsProvider, DnsProviderFactory, RecordAppender, RecordDeleter, RecordSetter,
};
use acmedns_core::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;

/// Public myaddr update endpoint
pub const MYADDR_UPDATE_URL: &str = "https://myaddr.tools/update";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER_NAME: &str = "myaddr";

/// Body of a single update request
#[derive(Serialize)]
struct UpdatePayload<'a> {
    key: &'a str,
    acme_challenge: &'a str,
}

/// myaddr DNS provider
///
/// Holds the shared secret for its whole lifetime. The HTTP client is
/// reused across calls; nothing else survives a call.
pub struct MyaddrProvider {
    /// myaddr registration key
    /// ⚠️ NEVER log this value
    key: String,

    /// Update endpoint
    endpoint: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the key
impl std::fmt::Debug for MyaddrProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MyaddrProvider")
            .field("key", &"<REDACTED>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl MyaddrProvider {
    /// Create a provider talking to the public myaddr endpoint
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(key, MYADDR_UPDATE_URL, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a provider talking to an alternate update endpoint
    ///
    /// # Errors
    ///
    /// - `Error::Config` if the key is empty or the HTTP client cannot be built
    pub fn with_endpoint(
        key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::config("myaddr key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            key,
            endpoint: endpoint.into(),
            client,
        })
    }

    /// The endpoint updates are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check every record before anything is sent
    ///
    /// Records are checked in order; the first offending record decides the error.
    fn validate_records(records: &[Record]) -> Result<()> {
        for record in records {
            if !record.is_txt() {
                return Err(Error::unsupported_type(record.record_type.clone()));
            }
            if !record.is_acme_challenge() {
                return Err(Error::unsupported_name(record.name.clone()));
            }
        }
        Ok(())
    }

    /// Post a single challenge value
    async fn publish(&self, record: &Record) -> Result<()> {
        let payload = UpdatePayload {
            key: &self.key,
            acme_challenge: &record.data,
        };
        let body = serde_json::to_vec(&payload)?;

        tracing::debug!("Publishing ACME challenge for {} to myaddr", record.name);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Failed to update record: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("myaddr rejected update for {}: {}", record.name, status);
            return Err(Error::upstream_rejected(PROVIDER_NAME, status.to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl RecordAppender for MyaddrProvider {
    /// myaddr has no distinct create operation, so appending is setting
    async fn append_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        self.set_records(zone, records).await
    }
}

#[async_trait]
impl RecordSetter for MyaddrProvider {
    /// Publish every record's value as the current ACME challenge
    ///
    /// `zone` is not part of the request; myaddr resolves the target from the key.
    async fn set_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        Self::validate_records(&records)?;

        for record in &records {
            self.publish(record).await?;
        }

        tracing::info!(
            "Published {} ACME challenge record(s) for zone {}",
            records.len(),
            zone
        );
        Ok(records)
    }
}

#[async_trait]
impl RecordDeleter for MyaddrProvider {
    async fn delete_records(&self, _zone: &str, _records: Vec<Record>) -> Result<Vec<Record>> {
        // Automatically expires upstream.
        Ok(Vec::new())
    }
}

impl DnsProvider for MyaddrProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating myaddr providers
pub struct MyaddrFactory;

impl DnsProviderFactory for MyaddrFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::Myaddr {
                key,
                endpoint,
                timeout_secs,
            } => {
                let endpoint = endpoint.as_deref().unwrap_or(MYADDR_UPDATE_URL);
                let timeout = timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT);

                if endpoint != MYADDR_UPDATE_URL {
                    tracing::warn!("myaddr provider using non-default endpoint: {}", endpoint);
                }

                Ok(Box::new(MyaddrProvider::with_endpoint(
                    key.clone(),
                    endpoint,
                    timeout,
                )?))
            }
            _ => Err(Error::config("Invalid config for myaddr provider")),
        }
    }
}

/// Register the myaddr provider with a registry
///
/// # Example
///
/// ```rust
/// use acmedns_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// acmedns_provider_myaddr::register(&registry);
/// assert!(registry.has_provider("myaddr"));
/// ```
pub fn register(registry: &acmedns_core::ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(MyaddrFactory));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creation() {
        let factory = MyaddrFactory;

        let provider = factory.create(&ProviderConfig::myaddr("test_key"));
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().provider_name(), "myaddr");
    }

    #[test]
    fn test_factory_wrong_config() {
        let factory = MyaddrFactory;

        let config = ProviderConfig::Custom {
            factory: "other".to_string(),
            config: serde_json::json!({}),
        };
        assert!(matches!(factory.create(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(MyaddrProvider::new(""), Err(Error::Config(_))));
    }

    #[test]
    fn test_default_endpoint() {
        let provider = MyaddrProvider::new("key").unwrap();
        assert_eq!(provider.endpoint(), "https://myaddr.tools/update");
    }

    #[test]
    fn test_key_not_exposed_in_debug() {
        let provider = MyaddrProvider::new("secret_key_12345").unwrap();

        let debug_str = format!("{:?}", provider);
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("MyaddrProvider"));
    }

    #[test]
    fn test_payload_shape() {
        let payload = UpdatePayload {
            key: "K",
            acme_challenge: "abc123",
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"key":"K","acme_challenge":"abc123"}"#
        );
    }

    #[test]
    fn test_validate_records() {
        let ok = vec![
            Record::txt("_acme-challenge.example.com", "a"),
            Record::txt("_acme-challenge.sub.example.com", "b"),
        ];
        assert!(MyaddrProvider::validate_records(&ok).is_ok());
        assert!(MyaddrProvider::validate_records(&[]).is_ok());

        let wrong_type = vec![Record::new("_acme-challenge.example.com", "CNAME", "x")];
        assert!(matches!(
            MyaddrProvider::validate_records(&wrong_type),
            Err(Error::UnsupportedRecordType(ref t)) if t == "CNAME"
        ));

        let wrong_name = vec![Record::txt("example.com", "x")];
        assert!(matches!(
            MyaddrProvider::validate_records(&wrong_name),
            Err(Error::UnsupportedRecordName(ref n)) if n == "example.com"
        ));
    }

    #[test]
    fn test_first_offending_record_decides() {
        let records = vec![
            Record::txt("www.example.com", "x"),
            Record::new("_acme-challenge.example.com", "A", "1.2.3.4"),
        ];
        assert!(matches!(
            MyaddrProvider::validate_records(&records),
            Err(Error::UnsupportedRecordName(_))
        ));
    }

    #[test]
    fn test_register() {
        let registry = acmedns_core::ProviderRegistry::new();
        register(&registry);
        assert!(registry.has_provider("myaddr"));
        assert!(registry.create_provider(&ProviderConfig::myaddr("key")).is_ok());
    }
}
