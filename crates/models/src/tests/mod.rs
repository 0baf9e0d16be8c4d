/// CRUD operations against a live database (skipped without one)
pub mod crud_tests;
