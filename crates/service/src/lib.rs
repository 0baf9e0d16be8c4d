//! Service layer for the pet registry.
//! - Separates business rules (validation, creator-only pet mutation) from data access.
//! - Reuses validation rules and entity definitions in the `models` crate.
//! - Each resource follows domain / repository / service, with a SeaORM and
//!   an in-memory repository implementation.

pub mod errors;
pub mod validation;
pub mod auth;
pub mod owner;
pub mod pet;
pub mod memory;
#[cfg(test)]
pub mod test_support;
