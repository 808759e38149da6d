//! API route handlers
//!
//! - `persons`: list, fetch, create and delete contact records
//! - `info`: the human-readable summary page

pub mod info;
pub mod persons;

/// Collection route.
pub const PERSONS: &str = "/api/persons";
/// Single-record route.
pub const PERSON: &str = "/api/persons/{id}";
/// Summary page route.
pub const INFO: &str = "/api/info";
