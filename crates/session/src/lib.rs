//! Persistent session storage for the inkpost blog client.
//!
//! The session is three independent string keys — access token, refresh
//! token, and a JSON-encoded user record — that must outlive process
//! restarts. [`SessionStore`] abstracts the device-local key/value store
//! holding them; [`FileSessionStore`] is the durable backend and
//! [`MemorySessionStore`] serves tests and embedders without a writable
//! filesystem.
//!
//! Absence of the access-token key means "logged out". No other durable
//! state is produced anywhere in the workspace.

mod error;
mod file;
mod memory;
mod store;
pub mod testing;

pub use error::SessionError;
pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use store::{SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
