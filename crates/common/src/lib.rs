//! Cross-crate helpers shared by the client registry workspace.

pub mod utils;
