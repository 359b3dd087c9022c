//! User stores
//!
//! Provides the data access layer behind the [`UserStore`] capability.

pub mod memory;
pub mod user;

pub use memory::InMemoryUserStore;
pub use user::{NewUser, PgUserStore, StoreError, UserRecord, UserStore};
