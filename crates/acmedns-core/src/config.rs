//! Configuration types for acmedns
//!
//! Where configuration comes from (environment, flags, a file) is up to the
//! embedding application. This module only describes and validates it.

use serde::{Deserialize, Serialize};

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// myaddr.tools provider
    Myaddr {
        /// Shared secret identifying the myaddr registration
        /// ⚠️ NEVER log this value
        key: String,
        /// Update endpoint override (defaults to the public myaddr API)
        #[serde(default)]
        endpoint: Option<String>,
        /// Per-request HTTP timeout in seconds
        #[serde(default)]
        timeout_secs: Option<u64>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

// Custom Debug implementation that hides the key
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Myaddr {
                endpoint,
                timeout_secs,
                ..
            } => f
                .debug_struct("Myaddr")
                .field("key", &"<REDACTED>")
                .field("endpoint", endpoint)
                .field("timeout_secs", timeout_secs)
                .finish(),
            ProviderConfig::Custom { factory, config } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", config)
                .finish(),
        }
    }
}

impl ProviderConfig {
    /// Create a myaddr configuration with default endpoint and timeout
    pub fn myaddr(key: impl Into<String>) -> Self {
        ProviderConfig::Myaddr {
            key: key.into(),
            endpoint: None,
            timeout_secs: None,
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Myaddr {
                key,
                endpoint,
                timeout_secs,
            } => {
                if key.trim().is_empty() {
                    return Err(crate::Error::config("myaddr key cannot be empty"));
                }
                if let Some(endpoint) = endpoint
                    && !endpoint.starts_with("https://")
                    && !endpoint.starts_with("http://")
                {
                    return Err(crate::Error::config(format!(
                        "myaddr endpoint must use HTTP or HTTPS scheme. Got: {}",
                        endpoint
                    )));
                }
                if *timeout_secs == Some(0) {
                    return Err(crate::Error::config("HTTP timeout must be > 0"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Myaddr { .. } => "myaddr",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}
