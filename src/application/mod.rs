//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! All caller-scoped reads and writes pass through [`PolicyGate`].

pub mod handlers;
mod policy_gate;

pub use policy_gate::{AttendanceFilter, PolicyGate};
