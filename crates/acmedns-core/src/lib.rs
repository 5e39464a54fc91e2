// # acmedns-core
//
// Core library for publishing ACME DNS-01 challenges through DNS provider APIs.
//
// ## Architecture Overview
//
// - **Record**: Provider-neutral DNS resource record descriptor
// - **RecordAppender / RecordSetter / RecordDeleter**: The capability traits a provider implements
// - **DnsProvider**: A provider that offers all three capabilities
// - **ProviderRegistry**: Plugin-based registry for DNS providers
//
// ## Design Principles
//
// 1. **Separation of Concerns**: The record contract lives here, provider APIs live in their own crates
// 2. **Plugin-Based**: Providers are registered dynamically, no hard-coded if-else
// 3. **Library-First**: All functionality can be used as a library
// 4. **Single-Shot**: Providers never retry, the caller decides what to do with an error

pub mod config;
pub mod error;
pub mod record;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use record::Record;
pub use registry::ProviderRegistry;
pub use traits::{DnsProvider, DnsProviderFactory, RecordAppender, RecordDeleter, RecordSetter};
