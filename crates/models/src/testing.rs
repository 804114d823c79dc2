//! In-memory SQLite databases with the registry tables created from the
//! entity definitions.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::{address, client};

/// Fresh single-connection `sqlite::memory:` database with tables created.
pub async fn sqlite_db() -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // every pooled connection would otherwise see its own empty database
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    create_tables(&db).await?;
    Ok(db)
}

pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let address_table = schema.create_table_from_entity(address::Entity).if_not_exists().to_owned();
    db.execute(backend.build(&address_table)).await?;
    let client_table = schema.create_table_from_entity(client::Entity).if_not_exists().to_owned();
    db.execute(backend.build(&client_table)).await?;
    Ok(())
}
