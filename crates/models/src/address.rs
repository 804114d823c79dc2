use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Postal-code keyed address cache row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub postal_code: String,
    pub street: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Client,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Client => Entity::has_many(crate::client::Entity).into() }
    }
}

impl Related<crate::client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Descriptive columns written by [`upsert`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressData {
    pub street: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

/// Exactly eight ASCII digits, no separator.
pub fn is_valid_postal_code(postal_code: &str) -> bool {
    postal_code.len() == 8 && postal_code.bytes().all(|b| b.is_ascii_digit())
}

pub async fn find(db: &DatabaseConnection, postal_code: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(postal_code.to_string()).one(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    use sea_orm::QueryOrder;
    Ok(Entity::find().order_by_asc(Column::PostalCode).all(db).await?)
}

/// Insert the address, or overwrite the descriptive columns of an existing row.
pub async fn upsert(db: &DatabaseConnection, postal_code: &str, data: AddressData) -> Result<Model, ModelError> {
    if !is_valid_postal_code(postal_code) {
        return Err(ModelError::Validation(format!("postal code must be 8 digits: {postal_code:?}")));
    }
    let now = Utc::now().into();
    if let Some(existing) = find(db, postal_code).await? {
        let mut am: ActiveModel = existing.into();
        am.street = Set(data.street);
        am.complement = Set(data.complement);
        am.district = Set(data.district);
        am.city = Set(data.city);
        am.state = Set(data.state);
        am.ibge = Set(data.ibge);
        am.gia = Set(data.gia);
        am.ddd = Set(data.ddd);
        am.siafi = Set(data.siafi);
        am.updated_at = Set(now);
        Ok(am.update(db).await?)
    } else {
        let am = ActiveModel {
            postal_code: Set(postal_code.to_string()),
            street: Set(data.street),
            complement: Set(data.complement),
            district: Set(data.district),
            city: Set(data.city),
            state: Set(data.state),
            ibge: Set(data.ibge),
            gia: Set(data.gia),
            ddd: Set(data.ddd),
            siafi: Set(data.siafi),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(am.insert(db).await?)
    }
}
