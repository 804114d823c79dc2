use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::address;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub postal_code: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Address,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Address => Entity::belongs_to(address::Entity)
                .from(Column::PostalCode)
                .to(address::Column::PostalCode)
                .into(),
        }
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef { Relation::Address.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("name required".into())); }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, name: &str, postal_code: &str) -> Result<Model, ModelError> {
    validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        postal_code: Set(postal_code.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// Update the row with `id`, inserting it under that id when absent.
pub async fn upsert(db: &DatabaseConnection, id: Uuid, name: &str, postal_code: &str) -> Result<Model, ModelError> {
    validate_name(name)?;
    let now = Utc::now().into();
    match Entity::find_by_id(id).one(db).await? {
        Some(existing) => {
            let mut am: ActiveModel = existing.into();
            am.name = Set(name.to_string());
            am.postal_code = Set(postal_code.to_string());
            am.updated_at = Set(now);
            Ok(am.update(db).await?)
        }
        None => {
            let am = ActiveModel {
                id: Set(id),
                name: Set(name.to_string()),
                postal_code: Set(postal_code.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            Ok(am.insert(db).await?)
        }
    }
}

pub async fn find_with_address(db: &DatabaseConnection, id: Uuid) -> Result<Option<(Model, Option<address::Model>)>, ModelError> {
    Ok(Entity::find_by_id(id).find_also_related(address::Entity).one(db).await?)
}

/// All clients joined with their address, oldest first.
pub async fn list_with_address(db: &DatabaseConnection) -> Result<Vec<(Model, Option<address::Model>)>, ModelError> {
    Ok(Entity::find()
        .find_also_related(address::Entity)
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Returns whether a row was removed.
pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
