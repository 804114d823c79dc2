use crate::{address, client, testing};
use crate::address::AddressData;
use crate::errors::ModelError;
use anyhow::Result;
use uuid::Uuid;

fn sample(street: &str) -> AddressData {
    AddressData {
        street: street.to_string(),
        district: "Sé".into(),
        city: "São Paulo".into(),
        state: "SP".into(),
        ..Default::default()
    }
}

#[test]
fn postal_code_format() {
    assert!(address::is_valid_postal_code("01001000"));
    assert!(!address::is_valid_postal_code("01001-000"));
    assert!(!address::is_valid_postal_code("0100100"));
    assert!(!address::is_valid_postal_code("0100100a"));
}

#[tokio::test]
async fn address_upsert_inserts_then_overwrites() -> Result<()> {
    let db = testing::sqlite_db().await?;

    let created = address::upsert(&db, "01001000", sample("Praça da Sé")).await?;
    assert_eq!(created.postal_code, "01001000");
    assert_eq!(created.street, "Praça da Sé");

    let updated = address::upsert(&db, "01001000", sample("Praça da Sé, lado ímpar")).await?;
    assert_eq!(updated.street, "Praça da Sé, lado ímpar");

    let all = address::list(&db).await?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[tokio::test]
async fn address_upsert_rejects_malformed_postal_code() -> Result<()> {
    let db = testing::sqlite_db().await?;
    let err = address::upsert(&db, "123", sample("Rua")).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert!(address::find(&db, "123").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn client_create_find_and_delete() -> Result<()> {
    let db = testing::sqlite_db().await?;
    address::upsert(&db, "12345678", sample("Rua Nova")).await?;

    let c = client::create(&db, "João", "12345678").await?;
    let (found, addr) = client::find_with_address(&db, c.id).await?.expect("client row");
    assert_eq!(found.name, "João");
    assert_eq!(addr.expect("joined address").street, "Rua Nova");

    assert!(client::hard_delete(&db, c.id).await?);
    assert!(!client::hard_delete(&db, c.id).await?);
    assert!(client::find_with_address(&db, c.id).await?.is_none());
    // address survives client removal
    assert!(address::find(&db, "12345678").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn client_upsert_keeps_id() -> Result<()> {
    let db = testing::sqlite_db().await?;
    address::upsert(&db, "12345678", sample("Rua Nova")).await?;
    address::upsert(&db, "87654321", sample("Rua Antiga")).await?;

    let id = Uuid::new_v4();
    let first = client::upsert(&db, id, "Maria", "12345678").await?;
    assert_eq!(first.id, id);

    let second = client::upsert(&db, id, "Maria Silva", "87654321").await?;
    assert_eq!(second.id, id);
    assert_eq!(second.name, "Maria Silva");
    assert_eq!(second.postal_code, "87654321");

    let rows = client::list_with_address(&db).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1.as_ref().map(|a| a.street.as_str()), Some("Rua Antiga"));
    Ok(())
}

#[tokio::test]
async fn client_requires_name() -> Result<()> {
    let db = testing::sqlite_db().await?;
    let err = client::create(&db, "   ", "12345678").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert!(client::list_with_address(&db).await?.is_empty());
    Ok(())
}
