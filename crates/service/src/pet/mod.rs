//! Pets: the only resource with creator-restricted mutation.

pub mod domain;
pub mod policy;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::PetService;
