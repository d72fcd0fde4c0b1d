//! Authentication adapters implementing the `SessionValidator` port.
//!
//! - `jwt` - HS256 shared-secret validator used in production
//! - `mock` - Fixed token table for tests

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtSessionValidator, SessionClaims, UserMetadata};
pub use mock::MockSessionValidator;
