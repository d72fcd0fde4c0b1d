//! HTTP middleware for axum.
//!
//! - `auth` - bearer-token validation and the `RequireAuth` extractor
//! - `service_key` - shared-secret guard for service routes

pub mod auth;
pub mod service_key;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAuth};
pub use service_key::{service_key_middleware, ServiceKey, SERVICE_KEY_HEADER};
