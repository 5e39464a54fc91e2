// # DNS Provider Traits
//
// Defines the interface for managing DNS records via provider APIs.
//
// ## Implementations
//
// - myaddr: `acmedns-provider-myaddr` crate
//
// ## Usage
//
// ```rust,ignore
// use acmedns_core::{Record, RecordSetter};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     // Publish a challenge
//     provider.set_records(
//         "example.com",
//         vec![Record::txt("_acme-challenge.example.com", "token")],
//     ).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::record::Record;

/// Capability: add records to a zone
///
/// Returns the records that were added.
#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Add `records` to `zone`
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, crate::Error>;
}

/// Capability: create or replace records in a zone
///
/// Returns the records that were set.
#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Set `records` in `zone`, updating existing records or creating new ones
    async fn set_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, crate::Error>;
}

/// Capability: remove records from a zone
///
/// Returns the records that were deleted.
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Delete `records` from `zone`
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, crate::Error>;
}

/// A DNS provider offering every record capability
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Single-Shot
///
/// Providers are isolated and stateless:
/// - ✅ Perform HTTP/HTTPS API calls to their endpoints only
/// - ✅ Return success or failure, the caller decides what happens next
/// - ❌ Spawn tasks or threads
/// - ❌ Implement retry logic or backoff
/// - ❌ Cache state beyond a single call
///
/// # Cancellation
///
/// Dropping the future returned by any capability aborts the in-flight
/// request. Records already applied by earlier requests in the same call
/// stay applied.
pub trait DnsProvider: RecordAppender + RecordSetter + RecordDeleter {
    /// Get the provider name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the provider (e.g., "myaddr")
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this provider
    ///
    /// # Returns
    ///
    /// A boxed DnsProvider trait object
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn DnsProvider>, crate::Error>;
}
