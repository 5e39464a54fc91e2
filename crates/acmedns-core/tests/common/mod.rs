//! Test doubles for provider contract tests

use acmedns_core::config::ProviderConfig;
use acmedns_core::error::Result;
use acmedns_core::traits::{
    DnsProvider, DnsProviderFactory, RecordAppender, RecordDeleter, RecordSetter,
};
use acmedns_core::{Error, Record};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A mock DnsProvider that records every call
#[derive(Clone, Default)]
pub struct MockDnsProvider {
    set_call_count: Arc<AtomicUsize>,
    delete_call_count: Arc<AtomicUsize>,
    applied: Arc<std::sync::Mutex<Vec<(String, Record)>>>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of times set_records() ran (append included)
    pub fn set_call_count(&self) -> usize {
        self.set_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times delete_records() was called
    pub fn delete_call_count(&self) -> usize {
        self.delete_call_count.load(Ordering::SeqCst)
    }

    /// Get the (zone, record) pairs applied so far
    pub fn applied(&self) -> Vec<(String, Record)> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RecordAppender for MockDnsProvider {
    async fn append_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        self.set_records(zone, records).await
    }
}

#[async_trait::async_trait]
impl RecordSetter for MockDnsProvider {
    async fn set_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        self.set_call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(bad) = records.iter().find(|r| !r.is_txt()) {
            return Err(Error::unsupported_type(bad.record_type.clone()));
        }

        let mut applied = self.applied.lock().unwrap();
        for record in &records {
            applied.push((zone.to_string(), record.clone()));
        }
        Ok(records)
    }
}

#[async_trait::async_trait]
impl RecordDeleter for MockDnsProvider {
    async fn delete_records(&self, _zone: &str, _records: Vec<Record>) -> Result<Vec<Record>> {
        self.delete_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

impl DnsProvider for MockDnsProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Factory handing out providers that share counters with `template`
pub struct MockFactory {
    pub template: MockDnsProvider,
}

impl DnsProviderFactory for MockFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::Custom { factory, .. } if factory == "mock" => {
                Ok(Box::new(self.template.clone()))
            }
            _ => Err(Error::config("Invalid config for mock provider")),
        }
    }
}

/// Helper to create a Custom config that routes to the mock factory
pub fn mock_config() -> ProviderConfig {
    ProviderConfig::Custom {
        factory: "mock".to_string(),
        config: serde_json::json!({}),
    }
}
