//! Class and roster query handlers.

mod get_class;
mod get_roster;

pub use get_class::{GetClassHandler, GetClassQuery};
pub use get_roster::{GetRosterHandler, GetRosterQuery};
