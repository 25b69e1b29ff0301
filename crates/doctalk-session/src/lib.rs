//! Session state and the session-scoped document cache.

pub mod cache;
pub mod session;
pub mod store;

pub use cache::{CacheKey, DocumentCache};
pub use session::Session;
pub use store::{MemorySessionStore, SessionStore};
