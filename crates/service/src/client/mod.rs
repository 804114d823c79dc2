//! Client registration: domain, repository and service layers.
//!
//! Addresses are cached by postal code; a cache miss falls back to the
//! external [`crate::address_lookup::AddressLookup`].

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::ClientService;
