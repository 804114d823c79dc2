//! External postal-code lookup.
//!
//! The service only sees the [`AddressLookup`] capability; [`viacep::ViaCepClient`]
//! is the HTTP implementation and [`mock::StubAddressLookup`] the test double.

use async_trait::async_trait;
use thiserror::Error;

use crate::client::domain::Address;

pub mod viacep;

pub use viacep::ViaCepClient;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("lookup service answered HTTP {0}")]
    Status(u16),
    #[error("malformed lookup response: {0}")]
    Decode(String),
    #[error("postal code {0} is not assigned")]
    Unassigned(String),
}

/// Resolves a postal code to a fully populated address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn consult(&self, postal_code: &str) -> Result<Address, LookupError>;
}

/// Scripted lookup for tests and doc examples; records every consultation.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct StubAddressLookup {
        known: HashMap<String, Address>,
        failure: Option<LookupError>,
        calls: AtomicUsize,
        consulted: Mutex<Vec<String>>,
    }

    impl StubAddressLookup {
        pub fn new() -> Self { Self::default() }

        /// Answer `address.postal_code` with `address`.
        pub fn with_address(self, address: Address) -> Self {
            let key = address.postal_code.clone();
            self.with_response(key, address)
        }

        /// Answer `postal_code` with `address` verbatim.
        pub fn with_response(mut self, postal_code: impl Into<String>, address: Address) -> Self {
            self.known.insert(postal_code.into(), address);
            self
        }

        /// Fail every consultation with `err`.
        pub fn failing(err: LookupError) -> Self {
            Self { failure: Some(err), ..Self::default() }
        }

        pub fn call_count(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        pub async fn calls_for(&self, postal_code: &str) -> usize {
            self.consulted.lock().await.iter().filter(|c| c.as_str() == postal_code).count()
        }
    }

    #[async_trait]
    impl AddressLookup for StubAddressLookup {
        async fn consult(&self, postal_code: &str) -> Result<Address, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.consulted.lock().await.push(postal_code.to_string());
            if let Some(err) = &self.failure {
                return Err(err.clone());
            }
            self.known
                .get(postal_code)
                .cloned()
                .ok_or_else(|| LookupError::Unassigned(postal_code.to_string()))
        }
    }
}
