use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Address, Client, ClientDraft};
use crate::errors::ServiceError;

/// Address cache keyed by postal code.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn find_by_postal_code(&self, postal_code: &str) -> Result<Option<Address>, ServiceError>;
    /// Upsert by `address.postal_code`.
    async fn save(&self, address: Address) -> Result<Address, ServiceError>;
}

/// Client records keyed by id.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Client>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, ServiceError>;
    /// Insert when `draft.id` is `None` (the store assigns the id), upsert otherwise.
    async fn save(&self, draft: ClientDraft) -> Result<Client, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// In-memory repositories for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    fn write_failure(store: &str) -> ServiceError {
        ServiceError::Persistence(format!("{store} store rejected write"))
    }

    #[derive(Default)]
    pub struct InMemoryAddressRepository {
        addresses: Mutex<HashMap<String, Address>>, // key: postal_code
        saves: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl InMemoryAddressRepository {
        /// Pre-populated cache; seeding does not count as a save.
        pub fn with_addresses(addresses: impl IntoIterator<Item = Address>) -> Self {
            let map = addresses.into_iter().map(|a| (a.postal_code.clone(), a)).collect();
            Self { addresses: Mutex::new(map), ..Self::default() }
        }

        pub fn save_count(&self) -> usize { self.saves.load(Ordering::SeqCst) }

        pub fn fail_writes(&self, fail: bool) { self.fail_writes.store(fail, Ordering::SeqCst); }

        pub async fn len(&self) -> usize { self.addresses.lock().await.len() }

        pub async fn is_empty(&self) -> bool { self.addresses.lock().await.is_empty() }
    }

    #[async_trait]
    impl AddressRepository for InMemoryAddressRepository {
        async fn find_by_postal_code(&self, postal_code: &str) -> Result<Option<Address>, ServiceError> {
            Ok(self.addresses.lock().await.get(postal_code).cloned())
        }

        async fn save(&self, address: Address) -> Result<Address, ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(write_failure("address"));
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.addresses.lock().await.insert(address.postal_code.clone(), address.clone());
            Ok(address)
        }
    }

    #[derive(Default)]
    pub struct InMemoryClientRepository {
        clients: Mutex<Vec<Client>>, // insertion order
        saves: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl InMemoryClientRepository {
        pub fn save_count(&self) -> usize { self.saves.load(Ordering::SeqCst) }

        pub fn fail_writes(&self, fail: bool) { self.fail_writes.store(fail, Ordering::SeqCst); }
    }

    #[async_trait]
    impl ClientRepository for InMemoryClientRepository {
        async fn find_all(&self) -> Result<Vec<Client>, ServiceError> {
            Ok(self.clients.lock().await.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, ServiceError> {
            Ok(self.clients.lock().await.iter().find(|c| c.id == id).cloned())
        }

        async fn save(&self, draft: ClientDraft) -> Result<Client, ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(write_failure("client"));
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            let client = Client {
                id: draft.id.unwrap_or_else(Uuid::new_v4),
                name: draft.name,
                address: draft.address,
            };
            let mut clients = self.clients.lock().await;
            match clients.iter_mut().find(|c| c.id == client.id) {
                Some(slot) => *slot = client.clone(),
                None => clients.push(client.clone()),
            }
            Ok(client)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(write_failure("client"));
            }
            let mut clients = self.clients.lock().await;
            let before = clients.len();
            clients.retain(|c| c.id != id);
            Ok(clients.len() != before)
        }
    }
}
