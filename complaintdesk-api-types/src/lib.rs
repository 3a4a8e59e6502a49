//! Shared types for the ComplaintDesk workspace
//!
//! This crate holds the fixed enumerations (roles, regions, complaint
//! status and priority) and the record types that arrive from the
//! spreadsheet backend. Records are parsed leniently at this boundary so
//! that downstream filtering never has to deal with untyped JSON.

pub mod conversions;
pub mod domain;
pub mod enums;
pub mod errors;

// Re-export main types for convenience
pub use conversions::{parse_row, parse_rows};
pub use domain::{Complaint, RegionScoped, StaffUser};
pub use enums::{ComplaintPriority, ComplaintStatus, Region, UserRole};
pub use errors::{MalformedRecord, ParseEnumError};
