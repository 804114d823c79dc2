use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::address::AddressData;

use crate::client::domain::{Address, Client, ClientDraft};
use crate::client::repository::{AddressRepository, ClientRepository};
use crate::errors::ServiceError;

fn to_address(m: models::address::Model) -> Address {
    Address {
        postal_code: m.postal_code,
        street: m.street,
        complement: m.complement,
        district: m.district,
        city: m.city,
        state: m.state,
        ibge: m.ibge,
        gia: m.gia,
        ddd: m.ddd,
        siafi: m.siafi,
    }
}

fn address_data(a: &Address) -> AddressData {
    AddressData {
        street: a.street.clone(),
        complement: a.complement.clone(),
        district: a.district.clone(),
        city: a.city.clone(),
        state: a.state.clone(),
        ibge: a.ibge.clone(),
        gia: a.gia.clone(),
        ddd: a.ddd.clone(),
        siafi: a.siafi.clone(),
    }
}

fn to_client(row: models::client::Model, address: Option<models::address::Model>) -> Result<Client, ServiceError> {
    let address = address.ok_or_else(|| {
        ServiceError::Persistence(format!("client {} references missing address {}", row.id, row.postal_code))
    })?;
    Ok(Client { id: row.id, name: row.name, address: to_address(address) })
}

pub struct SeaOrmAddressRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn find_by_postal_code(&self, postal_code: &str) -> Result<Option<Address>, ServiceError> {
        Ok(models::address::find(&self.db, postal_code).await?.map(to_address))
    }

    async fn save(&self, address: Address) -> Result<Address, ServiceError> {
        let saved = models::address::upsert(&self.db, &address.postal_code, address_data(&address)).await?;
        Ok(to_address(saved))
    }
}

pub struct SeaOrmClientRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn find_all(&self) -> Result<Vec<Client>, ServiceError> {
        models::client::list_with_address(&self.db)
            .await?
            .into_iter()
            .map(|(row, address)| to_client(row, address))
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, ServiceError> {
        models::client::find_with_address(&self.db, id)
            .await?
            .map(|(row, address)| to_client(row, address))
            .transpose()
    }

    async fn save(&self, draft: ClientDraft) -> Result<Client, ServiceError> {
        let row = match draft.id {
            Some(id) => models::client::upsert(&self.db, id, &draft.name, &draft.address.postal_code).await?,
            None => models::client::create(&self.db, &draft.name, &draft.address.postal_code).await?,
        };
        Ok(Client { id: row.id, name: row.name, address: draft.address })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::client::hard_delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sqlite_db;

    fn sample_address(postal_code: &str, street: &str) -> Address {
        Address {
            district: "Centro".into(),
            city: "Curitiba".into(),
            state: "PR".into(),
            ddd: "41".into(),
            ..Address::new(postal_code, street)
        }
    }

    #[tokio::test]
    async fn address_roundtrip_and_upsert() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAddressRepository { db: sqlite_db().await? };
        assert!(repo.find_by_postal_code("80010000").await?.is_none());

        let saved = repo.save(sample_address("80010000", "Rua XV de Novembro")).await?;
        assert_eq!(saved, sample_address("80010000", "Rua XV de Novembro"));
        assert_eq!(repo.find_by_postal_code("80010000").await?, Some(saved));

        repo.save(sample_address("80010000", "Rua das Flores")).await?;
        let found = repo.find_by_postal_code("80010000").await?.expect("address");
        assert_eq!(found.street, "Rua das Flores");
        Ok(())
    }

    #[tokio::test]
    async fn client_save_find_list_delete() -> Result<(), anyhow::Error> {
        let db = sqlite_db().await?;
        let addresses = SeaOrmAddressRepository { db: db.clone() };
        let clients = SeaOrmClientRepository { db };
        let address = addresses.save(sample_address("80010000", "Rua XV de Novembro")).await?;

        assert!(clients.find_all().await?.is_empty());

        let created = clients.save(ClientDraft { id: None, name: "Ana".into(), address: address.clone() }).await?;
        assert_eq!(created.name, "Ana");
        assert_eq!(created.address, address);

        let found = clients.find_by_id(created.id).await?.expect("client");
        assert_eq!(found, created);

        let renamed = clients.save(ClientDraft { id: Some(created.id), name: "Ana Paula".into(), address: address.clone() }).await?;
        assert_eq!(renamed.id, created.id);
        let all = clients.find_all().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Ana Paula");

        assert!(clients.delete(created.id).await?);
        assert!(!clients.delete(created.id).await?);
        assert!(clients.find_by_id(created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_a_validation_error() -> Result<(), anyhow::Error> {
        let db = sqlite_db().await?;
        let address = SeaOrmAddressRepository { db: db.clone() }.save(sample_address("80010000", "Rua XV")).await?;
        let err = SeaOrmClientRepository { db }
            .save(ClientDraft { id: None, name: " ".into(), address })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}
