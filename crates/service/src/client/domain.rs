use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal address, keyed by its 8-digit postal code (CEP).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub postal_code: String,
    pub street: String,
    #[serde(default)]
    pub complement: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub city: String,
    /// Federative unit (UF), e.g. `SP`
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub ibge: String,
    #[serde(default)]
    pub gia: String,
    #[serde(default)]
    pub ddd: String,
    #[serde(default)]
    pub siafi: String,
}

impl Address {
    pub fn new(postal_code: impl Into<String>, street: impl Into<String>) -> Self {
        Self { postal_code: postal_code.into(), street: street.into(), ..Default::default() }
    }
}

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub postal_code: String,
}

impl NewClient {
    pub fn new(name: impl Into<String>, postal_code: impl Into<String>) -> Self {
        Self { name: name.into(), postal_code: postal_code.into() }
    }
}

/// Persisted client with its resolved address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub address: Address,
}

/// Client about to be saved; `id: None` lets the store assign one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDraft {
    pub id: Option<Uuid>,
    pub name: String,
    pub address: Address,
}
