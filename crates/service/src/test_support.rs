#![cfg(test)]
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with the registry tables.
pub async fn sqlite_db() -> Result<DatabaseConnection, anyhow::Error> {
    Ok(models::testing::sqlite_db().await?)
}
