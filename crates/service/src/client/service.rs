use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{Address, Client, ClientDraft, NewClient};
use super::repository::{AddressRepository, ClientRepository};
use crate::address_lookup::AddressLookup;
use crate::errors::ServiceError;

/// Client registration service independent of web framework and storage.
///
/// The external lookup runs at most once per postal code as long as calls
/// are serialized; concurrent inserts of the same unseen code may each
/// consult it.
pub struct ClientService<C: ClientRepository, A: AddressRepository, L: AddressLookup> {
    clients: Arc<C>,
    addresses: Arc<A>,
    lookup: Arc<L>,
}

impl<C: ClientRepository, A: AddressRepository, L: AddressLookup> ClientService<C, A, L> {
    pub fn new(clients: Arc<C>, addresses: Arc<A>, lookup: Arc<L>) -> Self {
        Self { clients, addresses, lookup }
    }

    /// All persisted clients, in store order.
    pub async fn list_all(&self) -> Result<Vec<Client>, ServiceError> {
        self.clients.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Client, ServiceError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("client"))
    }

    /// Register a client, resolving its address from the cache or the lookup.
    ///
    /// # Examples
    /// ```
    /// use service::address_lookup::mock::StubAddressLookup;
    /// use service::client::domain::{Address, NewClient};
    /// use service::client::repository::mock::{InMemoryAddressRepository, InMemoryClientRepository};
    /// use service::client::ClientService;
    /// use std::sync::Arc;
    /// let lookup = Arc::new(StubAddressLookup::new().with_address(Address::new("12345678", "Rua Nova")));
    /// let svc = ClientService::new(
    ///     Arc::new(InMemoryClientRepository::default()),
    ///     Arc::new(InMemoryAddressRepository::default()),
    ///     lookup.clone(),
    /// );
    /// let client = tokio_test::block_on(svc.insert(NewClient::new("João", "12345678"))).unwrap();
    /// assert_eq!(client.address.street, "Rua Nova");
    /// let _ = tokio_test::block_on(svc.insert(NewClient::new("Maria", "12345678"))).unwrap();
    /// assert_eq!(lookup.call_count(), 1);
    /// ```
    #[instrument(skip(self, input), fields(postal_code = %input.postal_code))]
    pub async fn insert(&self, input: NewClient) -> Result<Client, ServiceError> {
        let address = self.resolve_address(&input.postal_code).await?;
        let client = self
            .clients
            .save(ClientDraft { id: None, name: input.name, address })
            .await?;
        info!(client_id = %client.id, postal_code = %client.address.postal_code, "client_created");
        Ok(client)
    }

    /// Replace name and address of an existing client.
    #[instrument(skip(self, input), fields(postal_code = %input.postal_code))]
    pub async fn update(&self, id: Uuid, input: NewClient) -> Result<Client, ServiceError> {
        if self.clients.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("client"));
        }
        let address = self.resolve_address(&input.postal_code).await?;
        let client = self
            .clients
            .save(ClientDraft { id: Some(id), name: input.name, address })
            .await?;
        info!(client_id = %client.id, postal_code = %client.address.postal_code, "client_updated");
        Ok(client)
    }

    /// Remove a client. Its address stays cached for other clients.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.clients.delete(id).await? {
            return Err(ServiceError::not_found("client"));
        }
        info!(client_id = %id, "client_deleted");
        Ok(())
    }

    async fn resolve_address(&self, postal_code: &str) -> Result<Address, ServiceError> {
        if let Some(cached) = self.addresses.find_by_postal_code(postal_code).await? {
            debug!("address_cache_hit");
            return Ok(cached);
        }
        debug!("address_cache_miss");
        let mut fetched = self.lookup.consult(postal_code).await?;
        fetched.postal_code = postal_code.to_string();
        self.addresses.save(fetched).await
    }
}
