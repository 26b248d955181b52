//! State stores for the inkpost blog client.
//!
//! Three independent stores mirror server state into memory, one per
//! domain: [`AuthStore`] (session and identity), [`BlogStore`] (content),
//! [`SettingsStore`] (reference data). Each is a plain constructible
//! struct — no ambient singletons — exposing an action surface that
//! mutates through `&mut self` and a read-only [state
//! snapshot](AuthStore::state). A view layer coordinates multi-store
//! reads; stores never call each other.
//!
//! Every fallible action reports through two channels at once: the
//! store's `error` field (for passive observation by whatever renders
//! the state) and the returned [`StoreError`] (for an immediate
//! reaction such as a toast). No action retries.

mod auth;
mod blog;
mod error;
mod messages;
mod settings;

pub use auth::{AuthState, AuthStore};
pub use blog::{BlogState, BlogStore};
pub use error::StoreError;
pub use settings::{SettingsState, SettingsStore};
