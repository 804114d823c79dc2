//! Persistence entities for the client registry.
//!
//! `address` is the postal-code keyed lookup cache; `client` references it
//! through its `postal_code` column.

pub mod errors;
pub mod db;
pub mod address;
pub mod client;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(test)]
mod tests;
