//! Service-side handlers: identity lifecycle and class administration.
//!
//! These run with service credentials and bypass the policy gate.

mod assign_class;
mod list_classes;
mod register_identity;
mod remove_identity;

pub use assign_class::{AssignClassCommand, AssignClassHandler};
pub use list_classes::ListClassesHandler;
pub use register_identity::{RegisterIdentityCommand, RegisterIdentityHandler};
pub use remove_identity::{RemoveIdentityCommand, RemoveIdentityHandler};
