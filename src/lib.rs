//! Class Portal - class announcements and attendance for a school.
//!
//! Students and teachers belong to classes. Teachers post announcements and
//! mark attendance for their class; students read their class feed and their
//! own attendance. Every caller-scoped read and write passes a row-level
//! policy check in [`application::PolicyGate`].

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
