//! Client session identity.
//!
//! The backend keys every connection by an opaque id the client generates
//! once and echoes on each call. The id lives in a small persistent
//! key-value store so it survives restarts; [`SessionProvider`] is the only
//! code that reads or writes it.

mod provider;
mod store;

pub use provider::{SESSION_KEY, SessionProvider};
pub use store::{FileStore, KeyValueStore, MemoryStore};
