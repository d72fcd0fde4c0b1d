//! Row-level access control.
//!
//! Every caller-facing read and write is filtered through these predicates.
//! They are pure functions of (caller, operation, row) and have no I/O;
//! `application::PolicyGate` is the single place that calls them.

mod caller;
mod predicates;

pub use caller::Caller;
pub use predicates::{evaluate, permits, AttendanceRow, Operation, RosterRow, RowPolicy, Table};
