//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPortalStore` - sqlx-backed `PortalStore` over the schema in `migrations/`

mod portal_store;

pub use portal_store::PostgresPortalStore;
