//! Shared building blocks for the pet registry crates.
//!
//! - `types`: small response types shared by server and client
//! - `utils::logging`: tracing subscriber bootstrap
//! - `pagination`: page math and in-memory paging used by the client listing

pub mod types;
pub mod utils;
pub mod pagination;
