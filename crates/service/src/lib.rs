//! Service layer for the client registry.
//! - `client`: registration workflow over injected stores and lookup.
//! - `address_lookup`: external postal-code resolution (ViaCEP).
//! - `runtime`: wiring from configuration to a ready service.

pub mod errors;
pub mod address_lookup;
pub mod client;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
