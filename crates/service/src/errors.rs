use thiserror::Error;

use crate::address_lookup::LookupError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("address lookup failed: {0}")]
    Lookup(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Lookup(_) => 1300,
            ServiceError::Persistence(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => ServiceError::Validation(msg),
            models::errors::ModelError::Db(msg) => ServiceError::Persistence(msg),
        }
    }
}

impl From<LookupError> for ServiceError {
    fn from(e: LookupError) -> Self { ServiceError::Lookup(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn model_errors_map_to_service_taxonomy() {
        assert!(matches!(ServiceError::from(ModelError::Db("boom".into())), ServiceError::Persistence(_)));
        assert!(matches!(ServiceError::from(ModelError::Validation("name required".into())), ServiceError::Validation(_)));
    }

    #[test]
    fn unassigned_postal_code_is_a_lookup_failure() {
        let err = ServiceError::from(LookupError::Unassigned("99999999".into()));
        assert_eq!(err.code(), 1300);
        assert!(err.to_string().contains("99999999"));
    }
}
