//! Dashboard query handler.

mod get_dashboard;

pub use get_dashboard::{Dashboard, GetDashboardHandler, GetDashboardQuery};
