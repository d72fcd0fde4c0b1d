//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth types)
//! - `classroom` - Classes, profiles, posts, attendance and the bootstrap rule
//! - `policy` - Row-level predicates deciding who may read or write which row

pub mod classroom;
pub mod foundation;
pub mod policy;
