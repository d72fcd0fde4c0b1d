//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - session validators (JWT, mock)
//! - `http` - axum routes and middleware
//! - `memory` - in-process `PortalStore`
//! - `postgres` - sqlx `PortalStore`

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::{JwtConfig, JwtSessionValidator, MockSessionValidator};
pub use memory::InMemoryPortalStore;
pub use postgres::PostgresPortalStore;
