//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and bearer-token verification live here; HTTP and
//! persistence details stay behind `AuthRepository`.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use service::{AuthConfig, AuthService};
