//! Runtime wiring
//!
//! Builds the production [`ClientService`]: SeaORM repositories over one
//! pooled connection plus the ViaCEP lookup client.

use std::sync::Arc;

use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::address_lookup::ViaCepClient;
use crate::client::repo::seaorm::{SeaOrmAddressRepository, SeaOrmClientRepository};
use crate::client::ClientService;

pub type RegistryService = ClientService<SeaOrmClientRepository, SeaOrmAddressRepository, ViaCepClient>;

/// Assemble the service from an open connection and a lookup client.
pub fn service_from_parts(db: DatabaseConnection, lookup: ViaCepClient) -> RegistryService {
    ClientService::new(
        Arc::new(SeaOrmClientRepository { db: db.clone() }),
        Arc::new(SeaOrmAddressRepository { db }),
        Arc::new(lookup),
    )
}

/// Connect the database and build the lookup client from config.
pub async fn build_client_service(cfg: &AppConfig) -> anyhow::Result<RegistryService> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let lookup = ViaCepClient::from_config(&cfg.lookup)?;
    info!(lookup_base_url = %lookup.base_url(), "client service ready");
    Ok(service_from_parts(db, lookup))
}

/// Load `.env` and config, initialize logging, then build the service.
pub async fn bootstrap() -> anyhow::Result<RegistryService> {
    dotenvy::dotenv().ok();
    let cfg = AppConfig::load_and_validate()?;
    init_logging(LogFormat::from_env_value(cfg.logging.format.as_deref()));
    info!(event = "bootstrap", version = env!("CARGO_PKG_VERSION"), "client registry starting");
    build_client_service(&cfg).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::domain::NewClient;
    use crate::errors::ServiceError;
    use crate::test_support::sqlite_db;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn end_to_end_insert_caches_address() -> Result<(), anyhow::Error> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/12345678/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cep": "12345-678",
                "logradouro": "Rua Nova",
                "bairro": "Centro",
                "localidade": "Campinas",
                "uf": "SP"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let lookup = ViaCepClient::new(server.uri(), Duration::from_secs(2))?;
        let svc = service_from_parts(sqlite_db().await?, lookup);

        let joao = svc.insert(NewClient::new("João", "12345678")).await?;
        let ana = svc.insert(NewClient::new("Ana", "12345678")).await?;
        assert_eq!(joao.address.street, "Rua Nova");
        assert_eq!(ana.address, joao.address);

        let all = svc.list_all().await?;
        assert_eq!(all.len(), 2);
        assert_eq!(svc.get_by_id(joao.id).await?, joao);

        server.verify().await;
        Ok(())
    }

    #[tokio::test]
    async fn end_to_end_unassigned_code_stores_nothing() -> Result<(), anyhow::Error> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "erro": true })))
            .mount(&server)
            .await;

        let lookup = ViaCepClient::new(server.uri(), Duration::from_secs(2))?;
        let svc = service_from_parts(sqlite_db().await?, lookup);

        let err = svc.insert(NewClient::new("João", "99999999")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Lookup(_)));
        assert!(svc.list_all().await?.is_empty());
        Ok(())
    }
}
