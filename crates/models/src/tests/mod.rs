/// CRUD operations tests for address and client rows
pub mod crud_tests;
