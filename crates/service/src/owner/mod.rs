//! Owners: people who own pets. Any authenticated caller may manage them.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::OwnerService;
