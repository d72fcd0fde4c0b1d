//! In-memory adapters for tests and local development.

mod portal_store;

pub use portal_store::InMemoryPortalStore;
