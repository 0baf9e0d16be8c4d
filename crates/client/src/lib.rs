//! Typed client for the pet registry API.
//!
//! `Session` owns the bearer token and persists it through a `SessionStore`;
//! `ApiClient` sends requests on behalf of a session and clears it whenever
//! the server answers 401.

pub mod errors;
pub mod session;
pub mod api;
pub mod flows;
pub mod listing;
pub mod forms;

pub use api::ApiClient;
pub use errors::{ClientError, ClientResult};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
