//! Core traits for acmedns
//!
//! This module defines the abstract interfaces that all providers must follow.
//!
//! - [`RecordAppender`]: Add records to a zone
//! - [`RecordSetter`]: Create or replace records in a zone
//! - [`RecordDeleter`]: Remove records from a zone
//! - [`DnsProvider`]: All three capabilities behind one object

pub mod dns_provider;

pub use dns_provider::{DnsProvider, DnsProviderFactory, RecordAppender, RecordDeleter, RecordSetter};
