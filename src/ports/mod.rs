//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PortalStore` - Relational store for identities, classes, profiles, posts, attendance
//! - `SessionValidator` - Bearer token validation

mod portal_store;
mod session_validator;

pub use portal_store::PortalStore;
pub use session_validator::SessionValidator;
